//! Obsidian app config (`.obsidian/app.json`) patching.
//!
//! The migrated vault keeps logseq's directory layout, and Obsidian is told
//! to use it: new notes go to `pages/`, attachments to `asset/`, and the
//! `logseq/` folder (backups, `.edn` config) is hidden from search. The
//! vault stays readable by logseq as well.

use crate::error::{MigrateError, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Default location of the app config inside a vault.
pub const APP_CONFIG_PATH: &str = ".obsidian/app.json";

/// Keys forced into the app config.
fn overrides() -> [(&'static str, Value); 4] {
    [
        ("newFileLocation", Value::from("folder")),
        ("newFileFolderPath", Value::from("pages")),
        ("attachmentFolderPath", Value::from("asset")),
        ("userIgnoreFilters", Value::from(vec!["logseq/"])),
    ]
}

/// Merge the logseq layout settings into an existing config.
///
/// Every other key is kept, in its original position.
pub fn merge_app_config(mut config: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overrides() {
        config.insert(key.to_string(), value);
    }
    config
}

/// Render a config the way Obsidian writes it (2-space indented JSON).
pub fn render_app_config(config: &Map<String, Value>) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Parse an app config, which must be a JSON object.
pub fn parse_app_config(text: &str, path: &Path) -> Result<Map<String, Value>> {
    let invalid = |message: String| MigrateError::InvalidAppConfig {
        path: path.to_path_buf(),
        message,
    };

    match serde_json::from_str::<Value>(text).map_err(|e| invalid(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(invalid(format!("expected a JSON object, found {}", kind(&other)))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Patch config text, returning the new text if anything changed.
pub fn patched_app_config(text: &str, path: &Path) -> Result<Option<String>> {
    let config = parse_app_config(text, path)?;
    let updated = render_app_config(&merge_app_config(config))?;
    Ok((updated != text).then_some(updated))
}

/// Patch the app config at `path`, creating it as `{}` first if missing.
///
/// Returns whether the file was written.
pub fn patch_app_config(path: &Path) -> Result<bool> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, "{}")?;
        log::debug!("created {}", path.display());
    }

    let text = std::fs::read_to_string(path)?;
    match patched_app_config(&text, path)? {
        Some(updated) => {
            std::fs::write(path, updated)?;
            log::info!("updated {}", path.display());
            Ok(true)
        }
        None => Ok(false),
    }
}
