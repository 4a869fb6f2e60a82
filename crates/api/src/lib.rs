//! HTTP API layer for suggestbox.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: student suggestion CRUD, admin login and answers, push
//!   subscription management
//! - **Extractors**: admin authentication, student key header
//! - **Middleware**: bearer-token resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
