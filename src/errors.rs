//! Unified application error type.
//! The feed core has its own narrow `FeedError`; everything the CLI touches
//! (config, seed files, runtime) is folded into `AppError`.

use std::io;
use thiserror::Error;

/// Errors raised by the live feed itself. All of them are programmer errors:
/// they are surfaced immediately and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Live feed accessed before initialization")]
    UninitializedAccess,

    #[error("Live feed is already initialized")]
    AlreadyInitialized,

    #[error("Rotation interval must be greater than zero")]
    InvalidInterval,
}

pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Feed
    // ---------------------------
    #[error(transparent)]
    Feed(#[from] FeedError),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Unsupported seed file format: {0}")]
    SeedFormat(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Runtime
    // ---------------------------
    #[error("Runtime error: {0}")]
    Runtime(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
