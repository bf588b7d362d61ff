//! Shared configuration, errors and types for the training schedule workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
