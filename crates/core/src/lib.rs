//! Core business logic for Publink.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! External systems are reached through ports implemented elsewhere.
//!
//! # Modules
//!
//! - `publication` - Publication and file artifact model, metadata port
//! - `access` - Who may download which file
//! - `storage` - Presigned download URLs via OpenDAL
//! - `shortener` - Short URL allocation and resolution
//! - `download` - The download link pipeline

pub mod access;
pub mod download;
pub mod publication;
pub mod shortener;
pub mod storage;
