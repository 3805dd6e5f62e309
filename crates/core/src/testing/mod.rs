//! Testing utilities and mock implementations.
//!
//! Mocks for the acquirer and dispatcher seams, so the ingest flow and the
//! HTTP layer can be exercised without network access or a real transcoder.
//!
//! # Example
//!
//! ```rust,ignore
//! use vidhook_core::testing::{MockAcquirer, MockDispatcher};
//!
//! let acquirer = MockAcquirer::new();
//! acquirer.set_next_error(AcquireError::DownloadFailed { status: 404 }).await;
//!
//! let dispatcher = MockDispatcher::new();
//! // ... build an Ingestor / AppState with them ...
//! assert!(dispatcher.recorded_inputs().await.is_empty());
//! ```

mod mock_acquirer;
mod mock_dispatcher;

pub use mock_acquirer::{MockAcquirer, RecordedAcquire};
pub use mock_dispatcher::MockDispatcher;
