//! Core business logic for marquee.

pub mod admin;
pub mod services;

pub use services::*;
