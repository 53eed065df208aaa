use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Flags that can be persisted in a config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub no_panel: bool,
    pub perf: bool,
    pub render_debug_log: Option<PathBuf>,
    pub suggestions: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; switches accumulate, paths from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            no_panel: self.no_panel || other.no_panel,
            perf: self.perf || other.perf,
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
            suggestions: other.suggestions.clone().or_else(|| self.suggestions.clone()),
            dictionary: other.dictionary.clone().or_else(|| self.dictionary.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("typolens").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("typolens")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("typolens").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("typolens")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".typolensrc")
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
    tracing::debug!(path = %path.display(), tokens = tokens.len(), "loaded config file");
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# typolens defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.no_panel {
        lines.push("--no-panel".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    let paths = [
        ("--render-debug-log", &flags.render_debug_log),
        ("--suggestions", &flags.suggestions),
        ("--dictionary", &flags.dictionary),
    ];
    for (flag, value) in paths {
        if let Some(value) = value {
            lines.push(format!("{flag} {}", value.display()));
        }
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved config defaults");
    Ok(())
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a raw argument list.
///
/// Unknown tokens (the program name, the file operand, `--save`) are
/// ignored. Path flags accept both `--flag value` and `--flag=value`.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--watch" | "-w" => flags.watch = true,
            "--no-panel" => flags.no_panel = true,
            "--perf" => flags.perf = true,
            _ => {
                if let Some((slot, value)) = path_flag(&mut flags, token) {
                    match value {
                        Some(value) => *slot = Some(PathBuf::from(value)),
                        None => {
                            if let Some(next) = tokens.get(i + 1) {
                                *slot = Some(PathBuf::from(next));
                                i += 1;
                            }
                        }
                    }
                }
            }
        }
        i += 1;
    }
    flags
}

fn path_flag<'a, 't>(
    flags: &'a mut ConfigFlags,
    token: &'t str,
) -> Option<(&'a mut Option<PathBuf>, Option<&'t str>)> {
    let (name, value) = match token.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    };
    let slot = match name {
        "--render-debug-log" => &mut flags.render_debug_log,
        "--suggestions" | "-s" => &mut flags.suggestions,
        "--dictionary" | "-d" => &mut flags.dictionary,
        _ => return None,
    };
    Some((slot, value))
}
