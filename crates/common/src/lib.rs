//! Common utilities and shared types for suggestbox.
//!
//! This crate provides foundational components used across all suggestbox
//! crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **VAPID**: Web Push key material loading and token signing via
//!   [`VapidSigner`]
//!
//! # Example
//!
//! ```no_run
//! use suggestbox_common::{AppResult, Config, IdGenerator};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {id}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod vapid;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use vapid::{VapidKeyError, VapidSigner};
