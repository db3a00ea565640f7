//! HTTP surface for the sports academy backend.
//!
//! Thin JSON layer over `academy_core` services: extract, run the service call
//! on the blocking pool, map the outcome to a status code.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::app;
pub use server::serve;
pub use state::AppState;
