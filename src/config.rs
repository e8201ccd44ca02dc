use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the ticketing backend.
    pub base_url: String,
    /// Transport timeout. Beyond this no timeout is enforced; a hung
    /// request is the UI's problem to guard against.
    pub timeout_secs: u64,
    /// TTL for cached reference data (the area hierarchy).
    pub cache_ttl_minutes: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_owned(),
            timeout_secs: 30,
            cache_ttl_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session record location; defaults next to the config dir.
    pub path: Option<PathBuf>,
}

impl SessionConfig {
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(ref path) = self.path {
            return path.clone();
        }
        config_dir().join("session.json")
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return PathBuf::from(xdg).join("repair-board");
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_owned());
    PathBuf::from(home).join(".config").join("repair-board")
}

/// Discover and load the app config.
///
/// Priority:
/// 1. explicit `--config` path
/// 2. `$REPAIR_BOARD_CONFIG`
/// 3. `$XDG_CONFIG_HOME/repair-board/config.toml`
/// 4. `~/.config/repair-board/config.toml`
///
/// Absent all of these, defaults apply.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit_path {
        return load_from(path);
    }
    if let Ok(env_path) = std::env::var("REPAIR_BOARD_CONFIG")
        && !env_path.is_empty()
    {
        return load_from(Path::new(&env_path));
    }
    let default_path = config_dir().join("config.toml");
    if default_path.exists() {
        return load_from(&default_path);
    }
    Ok(AppConfig::default())
}

fn load_from(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing TOML from {}", path.display()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_for_empty_toml() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.cache_ttl_minutes, 60);
        assert!(config.session.path.is_none());
    }

    #[test]
    fn partial_toml_overrides_selectively() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://repairs.example.org/api"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://repairs.example.org/api");
        assert_eq!(config.api.timeout_secs, 5);
        // Untouched field keeps its default.
        assert_eq!(config.api.cache_ttl_minutes, 60);
    }

    #[test]
    fn explicit_session_path_wins() {
        let config: AppConfig = toml::from_str(
            r#"
            [session]
            path = "/tmp/rb-session.json"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.session.resolved_path(),
            PathBuf::from("/tmp/rb-session.json")
        );
    }
}
