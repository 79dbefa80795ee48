//! Error types for keybinding and token operations.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeybindingsError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON array at the top level of {path}")]
    NotAnArray { path: PathBuf },

    #[error("failed to serialize keybindings: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("token lifetime must be positive")]
    InvalidLifetime,

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
