//! Acquirer module for fetching remote videos to local storage.
//!
//! Given a source URL and a destination directory, the acquirer derives a safe
//! file name, downloads the resource while following a bounded number of
//! redirects, and returns the final [`LocalFile`](crate::storage::LocalFile).
//!
//! # Example
//!
//! ```ignore
//! use vidhook_core::acquire::{Acquirer, HttpAcquirer};
//! use vidhook_core::AcquirerConfig;
//!
//! let acquirer = HttpAcquirer::new(AcquirerConfig::default())?;
//! let file = acquirer
//!     .acquire("https://cdn.example.com/clip.mp4", Path::new("input/short_form_9_16"), Duration::from_secs(60))
//!     .await?;
//! println!("{} ({} bytes)", file.path.display(), file.size_bytes);
//! ```

mod error;
mod http;
mod traits;
mod types;

pub use error::AcquireError;
pub use http::HttpAcquirer;
pub use traits::Acquirer;
pub use types::DownloadTask;
