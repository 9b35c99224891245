pub mod catalog;

pub use catalog::{CATALOG_NAMES, by_name, compact, sorani};
