//! Editor keybinding cleanup.
//!
//! Works on the per-user `keybindings.json` of VS Code style editors: a
//! top-level JSON array of objects carrying at least `key` and `command`.
//! Entries are kept as raw [`Value`]s so unknown fields survive a rewrite
//! untouched.

use crate::error::KeybindingsError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Shortcut removed by default.
pub const DEFAULT_KEY: &str = "cmd+alt+g";
/// Command bound to [`DEFAULT_KEY`] that gets removed by default.
pub const DEFAULT_COMMAND: &str = "editor.action.revealDefinition";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const INDENT: &[u8] = b"    ";

/// The (key, command) pair an entry must match exactly to be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingTarget {
    pub key: String,
    pub command: String,
}

impl Default for KeybindingTarget {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            command: DEFAULT_COMMAND.to_string(),
        }
    }
}

impl KeybindingTarget {
    pub fn new(key: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            command: command.into(),
        }
    }

    /// Exact, case-sensitive match on both `key` and `command`.
    ///
    /// Non-object entries and entries missing either field never match.
    pub fn matches(&self, entry: &Value) -> bool {
        entry.get("key").and_then(Value::as_str) == Some(self.key.as_str())
            && entry.get("command").and_then(Value::as_str) == Some(self.command.as_str())
    }
}

/// Parsed contents of a keybindings file.
#[derive(Debug, Clone, PartialEq)]
pub struct KeybindingsFile {
    pub entries: Vec<Value>,
    /// Whether the source started with a UTF-8 byte-order mark.
    pub has_bom: bool,
}

/// Counts before and after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    pub initial_count: usize,
    pub final_count: usize,
}

impl FilterOutcome {
    pub fn removed(&self) -> usize {
        self.initial_count - self.final_count
    }

    pub fn changed(&self) -> bool {
        self.initial_count != self.final_count
    }
}

/// Default location of Cursor's per-user keybindings file.
pub fn default_keybindings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join("Library")
            .join("Application Support")
            .join("Cursor")
            .join("User")
            .join("keybindings.json")
    })
}

/// Drop every entry matching `target`, keeping the order of the rest.
pub fn filter_entries(entries: Vec<Value>, target: &KeybindingTarget) -> Vec<Value> {
    let initial_count = entries.len();
    let kept: Vec<Value> = entries
        .into_iter()
        .filter(|entry| !target.matches(entry))
        .collect();

    tracing::debug!(
        key = %target.key,
        command = %target.command,
        removed = initial_count - kept.len(),
        "Filtered keybindings"
    );
    kept
}

pub fn load_keybindings(path: &Path) -> Result<KeybindingsFile, KeybindingsError> {
    let bytes = fs::read(path).map_err(|source| KeybindingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (body, has_bom) = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, true),
        None => (bytes.as_slice(), false),
    };

    let value: Value = serde_json::from_slice(body).map_err(|source| KeybindingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(entries) => {
            tracing::debug!(path = %path.display(), count = entries.len(), has_bom, "Loaded keybindings");
            Ok(KeybindingsFile { entries, has_bom })
        }
        _ => Err(KeybindingsError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

/// Serialize entries with a 4-space indent and a trailing newline.
pub fn render_keybindings(entries: &[Value], has_bom: bool) -> Result<Vec<u8>, KeybindingsError> {
    let mut out = Vec::new();
    if has_bom {
        out.extend_from_slice(UTF8_BOM);
    }

    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    entries
        .serialize(&mut serializer)
        .map_err(KeybindingsError::Serialize)?;

    out.push(b'\n');
    Ok(out)
}

/// Replace the file contents with `entries`.
///
/// Symlinks are followed, so the file they point at is the one replaced. The
/// new contents go to a temporary file next to it which is then renamed over
/// it, so the target is never left half-written. A read-only target is
/// refused rather than swapped out.
pub fn save_keybindings(
    path: &Path,
    entries: &[Value],
    has_bom: bool,
) -> Result<(), KeybindingsError> {
    let write_err = |source: io::Error| KeybindingsError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(write_err(e)),
    };

    let existing = fs::metadata(&target).ok();
    if existing.as_ref().is_some_and(|m| m.permissions().readonly()) {
        return Err(write_err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "file is read-only",
        )));
    }

    let bytes = render_keybindings(entries, has_bom)?;

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    if let Some(metadata) = existing {
        fs::set_permissions(tmp.path(), metadata.permissions()).map_err(write_err)?;
    }

    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    tracing::info!(path = %target.display(), entries = entries.len(), "Wrote keybindings");
    Ok(())
}

/// Remove every entry matching `target` from the file at `path`.
///
/// The file is only rewritten when something was removed and `dry_run` is
/// false.
pub fn remove_keybinding(
    path: &Path,
    target: &KeybindingTarget,
    dry_run: bool,
) -> Result<FilterOutcome, KeybindingsError> {
    let file = load_keybindings(path)?;
    let initial_count = file.entries.len();

    let kept = filter_entries(file.entries, target);
    let outcome = FilterOutcome {
        initial_count,
        final_count: kept.len(),
    };

    if outcome.changed() && !dry_run {
        save_keybindings(path, &kept, file.has_bom)?;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_target_matches_exact_pair_only() {
        let target = KeybindingTarget::default();

        assert!(target.matches(&json!({
            "key": "cmd+alt+g",
            "command": "editor.action.revealDefinition"
        })));
        assert!(!target.matches(&json!({
            "key": "CMD+ALT+G",
            "command": "editor.action.revealDefinition"
        })));
        assert!(!target.matches(&json!({
            "key": "cmd+alt+g",
            "command": "editor.action.goToDeclaration"
        })));
        assert!(!target.matches(&json!({ "key": "cmd+alt+g" })));
        assert!(!target.matches(&json!("cmd+alt+g")));
        assert!(!target.matches(&json!({ "key": 1, "command": 2 })));
    }

    #[test]
    fn test_filter_removes_all_matches_and_keeps_order() {
        let target = KeybindingTarget::new("ctrl+k", "workbench.action.quickOpen");
        let entries = vec![
            json!({ "key": "ctrl+a", "command": "a" }),
            json!({ "key": "ctrl+k", "command": "workbench.action.quickOpen" }),
            json!({ "key": "ctrl+b", "command": "b", "when": "editorTextFocus" }),
            json!({ "key": "ctrl+k", "command": "workbench.action.quickOpen", "when": "x" }),
            json!({ "key": "ctrl+c", "command": "c" }),
        ];

        let kept = filter_entries(entries, &target);

        assert_eq!(
            kept,
            vec![
                json!({ "key": "ctrl+a", "command": "a" }),
                json!({ "key": "ctrl+b", "command": "b", "when": "editorTextFocus" }),
                json!({ "key": "ctrl+c", "command": "c" }),
            ]
        );
    }

    #[test]
    fn test_render_uses_four_space_indent() {
        let entries = vec![json!({ "key": "ctrl+a", "command": "a" })];

        let rendered = String::from_utf8(render_keybindings(&entries, false).unwrap()).unwrap();

        assert_eq!(
            rendered,
            "[\n    {\n        \"key\": \"ctrl+a\",\n        \"command\": \"a\"\n    }\n]\n"
        );
    }

    #[test]
    fn test_render_preserves_field_order() {
        let entries: Vec<Value> =
            serde_json::from_str(r#"[{"when": "w", "command": "c", "key": "k", "args": {"z": 1, "a": 2}}]"#)
                .unwrap();

        let rendered = String::from_utf8(render_keybindings(&entries, false).unwrap()).unwrap();

        let when = rendered.find("\"when\"").unwrap();
        let command = rendered.find("\"command\"").unwrap();
        let key = rendered.find("\"key\"").unwrap();
        let z = rendered.find("\"z\"").unwrap();
        let a = rendered.find("\"a\"").unwrap();
        assert!(when < command && command < key);
        assert!(z < a);
    }

    #[test]
    fn test_render_keeps_numbers_exact() {
        let entries: Vec<Value> = serde_json::from_str(
            r#"[{"key": "k", "command": "c", "args": {"n": 123456789012345678901234567890, "f": 1.50}}]"#,
        )
        .unwrap();

        let rendered = String::from_utf8(render_keybindings(&entries, false).unwrap()).unwrap();

        assert!(rendered.contains("\"n\": 123456789012345678901234567890"));
        assert!(rendered.contains("\"f\": 1.50"));
    }

    #[test]
    fn test_render_keeps_bom() {
        let rendered = render_keybindings(&[], true).unwrap();
        assert!(rendered.starts_with(UTF8_BOM));
        assert_eq!(&rendered[UTF8_BOM.len()..], b"[]\n");
    }

    #[test]
    fn test_outcome_counts() {
        let outcome = FilterOutcome {
            initial_count: 5,
            final_count: 3,
        };
        assert_eq!(outcome.removed(), 2);
        assert!(outcome.changed());

        let unchanged = FilterOutcome {
            initial_count: 4,
            final_count: 4,
        };
        assert_eq!(unchanged.removed(), 0);
        assert!(!unchanged.changed());
    }

    #[test]
    fn test_default_path_ends_with_cursor_keybindings() {
        if let Some(path) = default_keybindings_path() {
            assert!(path.ends_with("Library/Application Support/Cursor/User/keybindings.json"));
        }
    }
}
