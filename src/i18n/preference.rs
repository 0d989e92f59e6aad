//! The saved language choice.
//!
//! A single file holding a language code, written whenever the user switches
//! language and read at start-up.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::Lang;

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("failed to read language preference {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write language preference {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Location of the preference file, next to the global config file.
pub fn preference_path() -> PathBuf {
    crate::config::global_config_path().with_file_name("language")
}

/// Read the saved language. A missing file or an unknown code is `None`.
pub fn load_preference(path: &Path) -> Result<Option<Lang>, PreferenceError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PreferenceError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let lang = Lang::from_code(content.trim());
    if lang.is_none() {
        tracing::warn!(path = %path.display(), "ignoring unknown saved language");
    }
    Ok(lang)
}

pub fn save_preference(path: &Path, lang: Lang) -> Result<(), PreferenceError> {
    let write_err = |source: io::Error| PreferenceError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    fs::write(path, format!("{}\n", lang.code())).map_err(write_err)?;
    tracing::debug!(%lang, path = %path.display(), "saved language preference");
    Ok(())
}

/// Guess a language from `LC_ALL`, `LC_MESSAGES` and `LANG`, in that order.
pub fn detect_from_env() -> Option<Lang> {
    detect_with(|name| std::env::var(name).ok())
}

fn detect_with(var: impl Fn(&str) -> Option<String>) -> Option<Lang> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|name| var(name))
        .find(|value| !value.trim().is_empty())
        .and_then(|value| Lang::from_code(&value))
}

/// Pick the start-up language: an explicit choice (CLI flag or route
/// prefix) wins over the saved preference, which wins over the
/// environment. English otherwise.
pub fn resolve_language(explicit: Option<Lang>, saved: Option<Lang>, env: Option<Lang>) -> Lang {
    explicit.or(saved).or(env).unwrap_or_default()
}
