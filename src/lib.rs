//! recap - A lightweight CLI tool for meeting transcript analysis
//!
//! Turns a raw meeting transcript into a condensed summary, an overall
//! sentiment label, and a prioritized action-item list.

pub mod analysis;
pub mod capability;
pub mod cli;
pub mod config;
pub mod text;

use thiserror::Error;

/// Main error type for recap
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Capability error: {0}")]
    Capability(#[from] capability::CapabilityError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RecapError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "recap";
