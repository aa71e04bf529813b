//! # MorJodi Admin Library
//!
//! Application layer of the MorJodi admin dashboard tooling: theme state
//! with accent-derived palettes, partner-preference and cascade queries
//! over the taxonomy catalog, and the `morjodi-admin` command line.
//!
//! ## Modules
//!
//! - [`cli`] - Command line definition and dispatch
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Application error type
//! - [`logger`] - Logging setup
//! - [`theme`] - Theme state, color derivation, persistence and publication
//! - [`universe`] - Local taxonomy exports
//! - [`validation`] - Input validation trait
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod theme;
pub mod universe;
pub mod validation;

pub use error::AppError;
pub use validation::Validator;
