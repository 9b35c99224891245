//! Draft and edit-mode state machine.
//!
//! The controller is either `Creating` a new entry or `Editing(id)` an
//! existing one. Every successful submit, and every cancel, returns it to
//! `Creating` with an empty draft. Failed requests leave both the mode and the
//! draft untouched so nothing the user typed is lost.

use std::sync::Arc;

use ferheng_store::{EntryStore, StoreError};
use ferheng_types::{Entry, EntryId, EntrySchema, FieldValues, Mode};

use crate::cache::EntryListCache;
use crate::error::{DraftError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Entry),
    Updated(EntryId),
}

/// A validated draft on its way to the store.
///
/// Obtained from [`DraftController::prepare_submit`], which marks the
/// controller busy until the ticket is handed back to
/// [`DraftController::complete_submit`].
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    mode: Mode,
    fields: FieldValues,
}

impl SubmitTicket {
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub async fn send(&self, store: &dyn EntryStore) -> Result<SubmitOutcome, StoreError> {
        match &self.mode {
            Mode::Creating => store.create(&self.fields).await.map(SubmitOutcome::Created),
            Mode::Editing(id) => store
                .update(id, &self.fields)
                .await
                .map(|()| SubmitOutcome::Updated(id.clone())),
        }
    }
}

pub struct DraftController {
    schema: Arc<EntrySchema>,
    store: Arc<dyn EntryStore>,
    mode: Mode,
    draft: FieldValues,
    busy: bool,
    pending_delete: Option<EntryId>,
}

impl DraftController {
    pub fn new(schema: Arc<EntrySchema>, store: Arc<dyn EntryStore>) -> Self {
        let draft = schema.empty_values();
        Self {
            schema,
            store,
            mode: Mode::Creating,
            draft,
            busy: false,
            pending_delete: None,
        }
    }

    pub fn schema(&self) -> &Arc<EntrySchema> {
        &self.schema
    }

    pub fn store(&self) -> Arc<dyn EntryStore> {
        self.store.clone()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn draft(&self) -> &FieldValues {
        &self.draft
    }

    pub fn value(&self, name: &str) -> &str {
        self.draft.get(name).map(String::as_str).unwrap_or("")
    }

    /// A submit or delete is waiting on the store
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn pending_delete(&self) -> Option<&EntryId> {
        self.pending_delete.as_ref()
    }

    /// Start a fresh entry, discarding the current draft
    pub fn begin_create(&mut self) {
        self.mode = Mode::Creating;
        self.draft = self.schema.empty_values();
    }

    /// Load a persisted entry into the draft for revision
    pub fn begin_edit(&mut self, entry: &Entry) -> Result<(), DraftError> {
        let id = entry.id.clone().ok_or(DraftError::NotPersisted)?;

        self.draft = self
            .schema
            .fields()
            .iter()
            .map(|f| (f.name.clone(), entry.value(&f.name).to_string()))
            .collect();
        self.mode = Mode::Editing(id);

        tracing::debug!("Editing word {:?}", self.mode);
        Ok(())
    }

    /// Replace one field's value. Required fields are only checked on submit.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), DraftError> {
        if !self.schema.contains(name) {
            return Err(DraftError::UnknownField(name.to_string()));
        }
        self.draft.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Leave edit mode without saving. No-op while creating.
    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, Mode::Editing(_)) {
            self.begin_create();
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<String> = self
            .schema
            .required_fields()
            .filter(|f| self.value(&f.name).trim().is_empty())
            .map(|f| f.name.clone())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Validate and lock the draft for sending
    pub fn prepare_submit(&mut self) -> Result<SubmitTicket, DraftError> {
        if self.busy {
            return Err(DraftError::Busy);
        }
        self.validate()?;

        self.busy = true;
        Ok(SubmitTicket {
            mode: self.mode.clone(),
            fields: self.draft.clone(),
        })
    }

    /// Apply the store's answer to a prepared submit.
    ///
    /// Success resets to `Creating` and reloads the list, whatever the mode
    /// is by now. Failure changes nothing but the busy flag.
    pub async fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<SubmitOutcome, StoreError>,
        cache: &mut EntryListCache,
    ) -> Result<SubmitOutcome, DraftError> {
        self.busy = false;

        match result {
            Ok(outcome) => {
                tracing::info!("Submit succeeded: {:?}", outcome);
                self.begin_create();
                cache.refresh().await;
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!("Submit failed while {:?}: {}", ticket.mode, e);
                Err(e.into())
            }
        }
    }

    /// Validate, send, and reconcile in one step
    pub async fn submit(&mut self, cache: &mut EntryListCache) -> Result<SubmitOutcome, DraftError> {
        let ticket = self.prepare_submit()?;
        let result = ticket.send(self.store.as_ref()).await;
        self.complete_submit(ticket, result, cache).await
    }

    /// Ask to delete an entry; nothing is sent until confirmed
    pub fn request_delete(&mut self, id: EntryId) {
        self.pending_delete = Some(id);
    }

    pub fn dismiss_delete(&mut self) -> Option<EntryId> {
        self.pending_delete.take()
    }

    /// Delete the entry awaiting confirmation
    pub async fn confirm_delete(
        &mut self,
        cache: &mut EntryListCache,
    ) -> Result<EntryId, DraftError> {
        if self.busy {
            return Err(DraftError::Busy);
        }
        let id = self.pending_delete.take().ok_or(DraftError::NoPendingDelete)?;

        self.busy = true;
        let result = self.store.delete(&id).await;
        self.busy = false;

        if let Err(e) = result {
            tracing::warn!("Delete of word {} failed: {}", id, e);
            return Err(e.into());
        }

        cache.remove_locally(&id);

        // The edit target no longer exists
        if self.mode.editing_id() == Some(&id) {
            self.begin_create();
        }

        tracing::info!("Deleted word {}", id);
        Ok(id)
    }
}
