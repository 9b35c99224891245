pub mod entry;
pub mod schema;
pub mod types;

pub use entry::{Entry, EntryDecodeError, EntryId, FieldValues, payload};
pub use schema::{Direction, EntrySchema, FieldSpec, SchemaError};
pub use types::{AppEvent, ListState, Mode, Notice};
