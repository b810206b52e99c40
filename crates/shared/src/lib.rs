//! Shared types, errors, and configuration for SRAS.
//!
//! This crate provides common types used across all other crates:
//! - Money as checked integer cents, parsed from human-entered amounts
//! - Canonical business codes for accounts, fee items and grade levels
//! - Record identifiers and pagination types
//! - Manila-time date formatting
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use error::{AppError, AppResult, GENERIC_ERROR_MESSAGE};
