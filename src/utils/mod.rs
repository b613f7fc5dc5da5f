//! Utility Functions
//!
//! User-friendly error formatting for the command-line binary.
//!
//! ```rust,no_run
//! use lamco_hand_pointer::config::Config;
//! use lamco_hand_pointer::utils::format_user_error;
//!
//! if let Err(e) = Config::load("config.toml") {
//!     eprintln!("{}", format_user_error(&e));
//! }
//! ```
//!
//! Error categories with context-aware help:
//! - Gesture configuration errors → per-field checklist
//! - TOML syntax errors → valid action and finger names
//! - Recording errors → expected JSON-lines layout

pub mod errors;

pub use errors::format_user_error;
