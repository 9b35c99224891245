use std::fmt;

use crate::entry::{Entry, EntryId, FieldValues};

/// Draft mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Creating,
    Editing(EntryId),
}

impl Mode {
    pub fn editing_id(&self) -> Option<&EntryId> {
        match self {
            Mode::Creating => None,
            Mode::Editing(id) => Some(id),
        }
    }
}

/// Outcome of the last list fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    /// Nothing fetched yet, or the store holds no entries
    #[default]
    Empty,
    Loaded(Vec<Entry>),
    /// The fetch failed; shown as empty but reported
    FetchFailed(String),
}

impl ListState {
    pub fn entries(&self) -> &[Entry] {
        match self {
            ListState::Loaded(entries) => entries,
            ListState::Empty | ListState::FetchFailed(_) => &[],
        }
    }
}

/// One-shot message for the user-facing layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Added(Option<EntryId>),
    Updated(EntryId),
    Deleted(EntryId),
    EditCancelled,
    DeleteDismissed,
    MissingRequired(Vec<String>),
    UnknownField(String),
    UnknownEntry(EntryId),
    NothingToConfirm,
    Busy,
    StoreFailed(String),
    ListFetchDegraded(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Added(Some(id)) => write!(f, "Word added! (id {id})"),
            Notice::Added(None) => write!(f, "Word added!"),
            Notice::Updated(_) => write!(f, "Word updated!"),
            Notice::Deleted(id) => write!(f, "Word {id} deleted"),
            Notice::EditCancelled => write!(f, "Edit cancelled"),
            Notice::DeleteDismissed => write!(f, "Delete cancelled"),
            Notice::MissingRequired(fields) => {
                write!(f, "Required field(s) empty: {}", fields.join(", "))
            }
            Notice::UnknownField(name) => write!(f, "Unknown field: {name}"),
            Notice::UnknownEntry(id) => write!(f, "No word with id {id}"),
            Notice::NothingToConfirm => write!(f, "No delete awaiting confirmation"),
            Notice::Busy => write!(f, "Still waiting for the store, try again shortly"),
            Notice::StoreFailed(message) => f.write_str(message),
            Notice::ListFetchDegraded(reason) => {
                write!(f, "Could not load words from the store: {reason}")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    // Intents, console -> app
    BeginCreate,
    BeginEdit(EntryId),
    SetField { name: String, value: String },
    Submit,
    CancelEdit,
    RequestDelete(EntryId),
    DeleteConfirmed(bool),
    Refresh,
    ShowEntry(EntryId),
    ShowDraft,
    Quit,

    // Updates, app -> console
    BackendReady,
    ShowList(ListState),
    ShowDraftState { mode: Mode, values: FieldValues },
    ShowEntryDetail(Entry),
    ConfirmDelete(EntryId),
    Notice(Notice),
}
