pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod webhook;

pub use error::ApiError;
pub use routes::create_router;
