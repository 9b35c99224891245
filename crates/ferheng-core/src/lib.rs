pub mod cache;
pub mod draft;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::EntryListCache;
pub use draft::{DraftController, SubmitOutcome, SubmitTicket};
pub use error::{DraftError, ValidationError};
