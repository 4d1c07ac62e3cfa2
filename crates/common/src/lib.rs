//! Common utilities and shared types for marquee.
//!
//! This crate provides foundational components used across all marquee crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Notices**: One-shot flash messages via [`Notice`]
//! - **Tokens**: Opaque API token generation via [`TokenGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use marquee_common::{Config, TokenGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let token = TokenGenerator::new().generate();
//!     println!("Issued token: {}", token);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod notice;
pub mod token;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use notice::{Notice, NoticeKind};
pub use token::TokenGenerator;
