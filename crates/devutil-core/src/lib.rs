//! Developer utilities core
//!
//! This crate provides editor keybinding cleanup and HS256 token
//! generation/verification used by the `devutil-cli` binaries.

pub mod error;
pub mod keybindings;
pub mod token;

pub use error::{KeybindingsError, TokenError};
pub use keybindings::{
    default_keybindings_path, filter_entries, load_keybindings, remove_keybinding,
    render_keybindings, save_keybindings, FilterOutcome, KeybindingTarget, KeybindingsFile,
};
pub use token::{generate_token, verify_token, Claims, TokenSigner};
