//! Shared configuration, errors, and money helpers for Cartera.
//!
//! This crate provides common pieces used across all other crates:
//! - Money rendering and minor-unit conversion
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
