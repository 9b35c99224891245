use ferheng_store::StoreError;
use ferheng_types::Notice;

/// Required fields left empty, caught before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Required field(s) empty: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Entry has not been saved yet")]
    NotPersisted,

    #[error("Another request is still running")]
    Busy,

    #[error("No delete awaiting confirmation")]
    NoPendingDelete,
}

impl DraftError {
    /// User-facing notice for this failure
    pub fn notice(&self) -> Notice {
        match self {
            DraftError::Validation(e) => Notice::MissingRequired(e.missing.clone()),
            DraftError::Store(e) => Notice::StoreFailed(e.to_string()),
            DraftError::UnknownField(name) => Notice::UnknownField(name.clone()),
            DraftError::NotPersisted => Notice::StoreFailed(self.to_string()),
            DraftError::Busy => Notice::Busy,
            DraftError::NoPendingDelete => Notice::NothingToConfirm,
        }
    }
}
