//! Shared types, errors, claims, and configuration for Publink.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for publications and files
//! - Application-wide error types
//! - JWT claims and token handling
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{AccessRight, Claims};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
