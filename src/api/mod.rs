//! HTTP service layer — a thin axum front over the two pipelines.

pub mod routes;
pub mod types;

pub use routes::{api_router, ApiContext};
