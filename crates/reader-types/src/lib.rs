pub mod error;
pub mod store;
pub mod text;
pub mod types;

pub use error::StoreError;
pub use store::ContentStore;
pub use types::{
    DocumentMeta, DocumentPatch, HardWord, NewDocument, OutlineEntry, ReadingIndex, RewriteOutcome,
};
