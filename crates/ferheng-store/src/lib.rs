mod client;


pub use client::RemoteEntryClient;

use async_trait::async_trait;
use ferheng_types::{Entry, EntryId, FieldValues};

/// Remote collection of dictionary entries
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Fetch the whole collection, in store order
    async fn list(&self) -> Result<Vec<Entry>, StoreError>;

    /// Persist a new entry, returning it with the id the store assigned
    async fn create(&self, fields: &FieldValues) -> Result<Entry, StoreError>;

    /// Replace every field of an existing entry
    async fn update(&self, id: &EntryId, fields: &FieldValues) -> Result<(), StoreError>;

    /// Remove an entry. Removing one that is already gone succeeds.
    async fn delete(&self, id: &EntryId) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Failed: {}", .detail.as_deref().unwrap_or("Unknown error"))]
    Rejected { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Detail string the store sent back, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            StoreError::Rejected { detail, .. } => detail.as_deref(),
            StoreError::Network(_) | StoreError::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else {
            StoreError::Network(e.to_string())
        }
    }
}
