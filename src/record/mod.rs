//! Record data model for aerofind
//!
//! A source record decodes into its name plus a fixed-arity tuple of typed
//! fields. Tuples sharing one lowercase name accumulate in a RecordGroup.

mod group;
mod value;

pub use group::RecordGroup;
pub use value::{FieldTuple, FieldValue};
