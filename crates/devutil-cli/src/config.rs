//! Tool configuration from environment.

use std::env;
use std::path::PathBuf;

pub const KEYBINDINGS_PATH_VAR: &str = "KEYBINDINGS_PATH";
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";

#[derive(Clone, Default)]
pub struct Config {
    pub keybindings_path: Option<PathBuf>,
    pub jwt_secret: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("keybindings_path", &self.keybindings_path)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            keybindings_path: non_blank(lookup(KEYBINDINGS_PATH_VAR)).map(PathBuf::from),
            jwt_secret: non_blank(lookup(JWT_SECRET_VAR)),
        }
    }
}

/// Treat empty or whitespace-only values as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
