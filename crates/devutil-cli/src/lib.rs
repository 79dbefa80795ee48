//! Devutil CLI - Command line tools built on `devutil-core`.
//!
//! This crate provides the CLI binaries:
//! - fix_keybindings: removes a keybinding from the editor's keybindings.json
//! - generate_token: HS256 token generator

pub mod config;
pub mod logging;

pub use config::Config;
