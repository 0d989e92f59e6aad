use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::i18n::Lang;

const APP_DIR: &str = "contextsite";
const LOCAL_RC: &str = ".contextsiterc";

/// Flags that can be persisted as defaults with `--save`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_toc: bool,
    pub perf: bool,
    pub lang: Option<Lang>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; booleans are or-ed and `other` wins for options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_toc: self.no_toc || other.no_toc,
            perf: self.perf || other.perf,
            lang: other.lang.or(self.lang),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR).join("config");
        }
    }

    PathBuf::from(LOCAL_RC)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_RC)
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# contextsite defaults (saved with --save)".to_string());
    if flags.no_toc {
        lines.push("--no-toc".to_string());
    }
    if let Some(lang) = flags.lang {
        lines.push(format!("--lang {}", lang.code()));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-toc" {
            flags.no_toc = true;
        } else if token == "--perf" {
            flags.perf = true;
        } else if token == "--lang" {
            if let Some(next) = tokens.get(i + 1) {
                flags.lang = Lang::from_code(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--lang=") {
            flags.lang = Lang::from_code(value);
        } else if token == "--render-debug-log" {
            if let Some(next) = tokens.get(i + 1) {
                flags.render_debug_log = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--render-debug-log=") {
            flags.render_debug_log = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}
