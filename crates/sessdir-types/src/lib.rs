//! # sessdir-types
//!
//! Core type definitions for the sessdir active-session storage layer.
//!
//! This crate is the foundation of the dependency graph -- all other
//! sessdir crates depend on it. It contains:
//!
//! - **[`error`]** -- [`StorageError`] and the [`Result`] alias
//! - **[`config`]** -- Configuration schema and environment overrides
//! - **[`session`]** -- Known session property names
//! - **[`user`]** -- Resolved user identity

pub mod config;
pub mod error;
pub mod session;
pub mod user;

pub use error::{Result, StorageError};
pub use user::SystemUser;
