//! HTTP API layer for marquee.
//!
//! This crate provides the REST API of the movie store:
//!
//! - **Endpoints**: catalog, reviews, petitions, voting, and the
//!   administrative surface
//! - **Extractors**: authentication (required, optional, admin-only)
//! - **Middleware**: bearer-token authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
pub use response::{ApiResponse, Notice};
