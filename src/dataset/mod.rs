//! Dataset loading for aerofind
//!
//! Decodes the delimited airport collection into typed records and builds
//! the name trie. The trie and the filter engine never re-derive field
//! types; this module is the single place the layout is known.

mod errors;
mod loader;

pub use errors::{DatasetError, DatasetResult};
pub use loader::{decode_record, load_trie, COLUMN_COUNT, NAME_COLUMN};
