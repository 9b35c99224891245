
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use ferheng_store::{EntryStore, StoreError};
use ferheng_types::{Entry, EntryId, FieldValues};

/// In-memory store with optional failure and latency
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Entry>>,
    next_id: Mutex<u64>,
    fail_list: Mutex<bool>,
    delay: Mutex<Option<Duration>>,
    crash_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn seed(&self, entry: Entry) {
        self.rows.lock().unwrap().push(entry);
    }

    pub fn rows(&self) -> Vec<Entry> {
        self.rows.lock().unwrap().clone()
    }

    pub fn fail_list(&self) {
        *self.fail_list.lock().unwrap() = true;
    }

    pub fn slow(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Make every create or update panic mid-request
    pub fn crash_writes(&self) {
        *self.crash_writes.lock().unwrap() = true;
    }

    async fn lag(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.crash_writes.lock().unwrap() {
            panic!("store crashed mid-request");
        }
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        if *self.fail_list.lock().unwrap() {
            return Err(StoreError::Network("connection refused".to_string()));
        }
        Ok(self.rows())
    }

    async fn create(&self, fields: &FieldValues) -> Result<Entry, StoreError> {
        self.lag().await;
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            *next_id
        };
        let entry = Entry::with_id(EntryId::from(id), fields.clone());
        self.rows.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn update(&self, id: &EntryId, fields: &FieldValues) -> Result<(), StoreError> {
        self.lag().await;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|e| e.id.as_ref() == Some(id)) {
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
        self.rows.lock().unwrap().retain(|e| e.id.as_ref() != Some(id));
        Ok(())
    }
}
