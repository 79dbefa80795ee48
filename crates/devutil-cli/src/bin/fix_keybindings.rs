//! CLI tool to remove a keybinding from the editor's user keybindings.json.
//!
//! Errors are printed as `Error: <message>` and the process still exits 0.

use clap::Parser;
use devutil_cli::{logging, Config};
use devutil_core::keybindings::{
    default_keybindings_path, filter_entries, load_keybindings, save_keybindings,
    KeybindingTarget, DEFAULT_COMMAND, DEFAULT_KEY,
};
use devutil_core::KeybindingsError;
use std::path::PathBuf;

/// Remove every keybinding matching an exact (key, command) pair
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Keybindings file (falls back to KEYBINDINGS_PATH, then Cursor's user keybindings.json)
    #[arg(long)]
    path: Option<PathBuf>,

    /// Key combination to match
    #[arg(long, default_value = DEFAULT_KEY)]
    key: String,

    /// Command identifier to match
    #[arg(long, default_value = DEFAULT_COMMAND)]
    command: String,

    /// Report what would change without writing the file
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        println!("Error: {}", e);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    logging::init()?;

    let config = Config::from_env();
    tracing::debug!(?config, "Loaded configuration");

    let path = args
        .path
        .or(config.keybindings_path)
        .or_else(default_keybindings_path)
        .ok_or(KeybindingsError::NoHomeDir)?;
    println!("Reading from {}", path.display());

    let target = KeybindingTarget::new(args.key, args.command);
    let file = load_keybindings(&path)?;
    let initial_count = file.entries.len();
    println!("Initial count: {}", initial_count);

    let kept = filter_entries(file.entries, &target);
    let final_count = kept.len();
    println!("Final count: {}", final_count);

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if initial_count == final_count {
        println!("No changes needed.");
    } else if args.dry_run {
        println!("Dry run: would update {}", file_name);
    } else {
        save_keybindings(&path, &kept, file.has_bom)?;
        println!("Successfully updated {}", file_name);
    }

    Ok(())
}
