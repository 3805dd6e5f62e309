//! Local storage for submissions.
//!
//! Files live under `<input_root>/<category>/<prefix>_<name>`. That layout is
//! the contract with the external transcoder.

mod error;
mod store;
mod stream;
mod types;

pub use error::{StorageError, StreamError};
pub use store::CategoryStore;
pub use stream::{partial_path, write_stream};
pub use types::LocalFile;
