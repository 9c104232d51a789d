// src/error.rs
use std::io;

use thiserror::Error;

/// A row that does not match the card-table layout. Fatal for that row only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("row has {found} cells, expected at least {expected}")]
    TooFewCells { found: usize, expected: usize },
}

/// Locating the card table inside a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("invalid table selector `{selector}`: {reason}")]
    BadSelector { selector: String, reason: String },

    #[error("could not find the card table with `{selector}`")]
    NotFound { selector: String },

    #[error("card table `{selector}` has no data rows")]
    NoRows { selector: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("empty-value marker must not be empty")]
    EmptySentinel,

    #[error("empty-value marker {0:?} is not whitespace-normalized")]
    SentinelNotNormalized(String),

    #[error("worker count must be at least 1")]
    NoWorkers,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
