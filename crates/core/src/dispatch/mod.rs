//! Dispatcher module for handing local files to the external transcoder.
//!
//! Dispatch is fire-and-forget: the child process is spawned, its output
//! channels are relayed to the log by detached tasks, and the caller gets an
//! [`InvocationHandle`] back immediately. Only spawn failures are reported.

mod error;
mod process;
mod traits;
mod types;

pub use error::DispatchError;
pub use process::ProcessDispatcher;
pub use traits::Dispatcher;
pub use types::{InvocationHandle, OutputStream};
