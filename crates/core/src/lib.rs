//! Core business logic for suggestbox.

pub mod services;

pub use services::*;
