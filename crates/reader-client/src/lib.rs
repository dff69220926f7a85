//! Client side of the reader: remote store access, local metadata mirror,
//! the file ingestion pipeline and the reading session.

pub mod import;
pub mod local;
pub mod remote;
pub mod session;

pub use import::{detect_directive, Directive, ImportError, Importer, ListingView};
pub use local::LocalStore;
pub use remote::RemoteStore;
pub use session::{paginate, ReaderSession};
