//! In-memory `EntryStore` that records every call

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ferheng_store::{EntryStore, StoreError};
use ferheng_types::{Entry, EntryId, EntrySchema, FieldSpec, FieldValues};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(FieldValues),
    Update(EntryId, FieldValues),
    Delete(EntryId),
}

#[derive(Default)]
struct Inner {
    rows: Vec<Entry>,
    next_id: u64,
    calls: Vec<Call>,
    fail_next: Option<StoreError>,
    fail_list: bool,
}

#[derive(Default)]
pub struct FakeStore {
    inner: Mutex<Inner>,
}

impl FakeStore {
    /// Store whose next created entry gets `first_id`
    pub fn starting_at(first_id: u64) -> Arc<Self> {
        let store = Self::default();
        store.inner.lock().unwrap().next_id = first_id;
        Arc::new(store)
    }

    pub fn seed(&self, entry: Entry) {
        self.inner.lock().unwrap().rows.push(entry);
    }

    /// Make the next create/update/delete fail
    pub fn fail_next(&self, error: StoreError) {
        self.inner.lock().unwrap().fail_next = Some(error);
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Calls other than `list`
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| *c != Call::List)
            .collect()
    }
}

#[async_trait]
impl EntryStore for FakeStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::List);
        if inner.fail_list {
            return Err(StoreError::Network("connection refused".to_string()));
        }
        Ok(inner.rows.clone())
    }

    async fn create(&self, fields: &FieldValues) -> Result<Entry, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Create(fields.clone()));
        if let Some(e) = inner.fail_next.take() {
            return Err(e);
        }
        let entry = Entry::with_id(EntryId::from(inner.next_id), fields.clone());
        inner.next_id += 1;
        inner.rows.push(entry.clone());
        Ok(entry)
    }

    async fn update(&self, id: &EntryId, fields: &FieldValues) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Update(id.clone(), fields.clone()));
        if let Some(e) = inner.fail_next.take() {
            return Err(e);
        }
        match inner.rows.iter_mut().find(|e| e.id.as_ref() == Some(id)) {
            Some(row) => {
                row.fields = fields.clone();
                Ok(())
            }
            None => Err(StoreError::Rejected {
                status: 404,
                detail: Some("Word not found".to_string()),
            }),
        }
    }

    async fn delete(&self, id: &EntryId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete(id.clone()));
        if let Some(e) = inner.fail_next.take() {
            return Err(e);
        }
        inner.rows.retain(|e| e.id.as_ref() != Some(id));
        Ok(())
    }
}

/// `{headword (required, rtl), english}`
pub fn headword_schema() -> Arc<EntrySchema> {
    Arc::new(
        EntrySchema::new(vec![
            FieldSpec::new("headword", "Headword").rtl().required(),
            FieldSpec::new("english", "English"),
        ])
        .unwrap(),
    )
}

pub fn values(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
