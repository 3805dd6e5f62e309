//! HTTP surface of the vidhook ingestion gateway.

pub mod api;
pub mod metrics;
pub mod state;
