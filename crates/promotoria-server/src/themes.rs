//! Theme JSON files and the one-line active-theme pointer.

use std::path::{Component, Path};

use serde_json::{Map, Value};
use thiserror::Error;

pub const ACTIVE_THEME_FILE: &str = "active_theme.txt";
pub const DEFAULT_THEME: &str = "modo_neon.json";
const THEME_EXTENSION: &str = ".json";

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme not found: {0}")]
    NotFound(String),

    #[error("invalid theme file name '{0}': expected a bare *.json file name")]
    InvalidName(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("theme file {file} is not a JSON object")]
    Malformed { file: String },
}

/// `true` for a plain `name.json` with no directory part.
#[must_use]
pub fn is_valid_theme_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    let single_normal = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none();
    single_normal
        && !name.contains(['/', '\\'])
        && !name.starts_with('.')
        && name.len() > THEME_EXTENSION.len()
        && name.ends_with(THEME_EXTENSION)
}

fn io_error(path: &Path, source: std::io::Error) -> ThemeError {
    ThemeError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Reads one theme as `{file, ...content}`.
fn read_theme(dir: &Path, file: &str) -> Result<Value, ThemeError> {
    let path = dir.join(file);
    let raw = std::fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
    let Ok(Value::Object(content)) = serde_json::from_str::<Value>(&raw) else {
        return Err(ThemeError::Malformed {
            file: file.to_owned(),
        });
    };

    let mut theme = Map::with_capacity(content.len() + 1);
    theme.insert("file".to_owned(), Value::String(file.to_owned()));
    theme.extend(content);
    Ok(Value::Object(theme))
}

/// Every `*.json` theme in `dir`, sorted by file name. Unreadable or
/// malformed files are skipped.
///
/// # Errors
///
/// Returns [`ThemeError::Io`] if `dir` cannot be listed.
pub fn list_themes(dir: &Path) -> Result<Vec<Value>, ThemeError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(THEME_EXTENSION) && entry.path().is_file() {
                files.push(name.to_owned());
            }
        }
    }
    files.sort();

    let mut themes = Vec::with_capacity(files.len());
    for file in files {
        match read_theme(dir, &file) {
            Ok(theme) => themes.push(theme),
            Err(error) => tracing::warn!(file = %file, error = %error, "skipping theme file"),
        }
    }
    Ok(themes)
}

/// File name recorded in the pointer, or [`DEFAULT_THEME`] when the pointer
/// is missing, blank or not a bare theme name.
///
/// # Errors
///
/// Returns [`ThemeError::Io`] if the pointer exists but cannot be read.
pub fn active_theme_name(dir: &Path) -> Result<String, ThemeError> {
    let pointer = dir.join(ACTIVE_THEME_FILE);
    let raw = match std::fs::read_to_string(&pointer) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(DEFAULT_THEME.to_owned()),
        Err(e) => return Err(io_error(&pointer, e)),
    };

    let name = raw.trim();
    if is_valid_theme_name(name) {
        Ok(name.to_owned())
    } else {
        tracing::warn!(pointer = %name, "ignoring invalid active theme pointer");
        Ok(DEFAULT_THEME.to_owned())
    }
}

/// The active theme as `{file, ...content}`.
///
/// # Errors
///
/// Returns [`ThemeError::NotFound`] if the named theme file does not exist.
pub fn active_theme(dir: &Path) -> Result<Value, ThemeError> {
    let name = active_theme_name(dir)?;
    if !dir.join(&name).is_file() {
        return Err(ThemeError::NotFound(name));
    }
    read_theme(dir, &name)
}

/// Overwrites the pointer with `name`.
///
/// # Errors
///
/// Returns [`ThemeError::InvalidName`] for anything but a bare `*.json` name,
/// or [`ThemeError::Io`] if the pointer cannot be written.
pub fn set_active_theme(dir: &Path, name: &str) -> Result<(), ThemeError> {
    if !is_valid_theme_name(name) {
        return Err(ThemeError::InvalidName(name.to_owned()));
    }
    let pointer = dir.join(ACTIVE_THEME_FILE);
    std::fs::write(&pointer, name).map_err(|e| io_error(&pointer, e))?;
    tracing::info!(theme = name, "active theme updated");
    Ok(())
}
