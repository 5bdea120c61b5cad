use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Browser User-Agent sent with every request; stream hosts tend to reject
/// default library agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Global configuration loaded from `~/.config/m3uprobe/config.toml`.
///
/// Passed into the prober as an immutable value; CLI flags may override
/// individual fields for a single run. Missing fields fall back to defaults,
/// so a partial config file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// User-Agent header used for the master and nested fetches.
    pub user_agent: String,
    /// Timeout in seconds for the master playlist fetch.
    pub master_timeout_secs: u64,
    /// Timeout in seconds for each nested candidate fetch.
    pub nested_timeout_secs: u64,
    /// How many candidate URIs are tried before the probe gives up (hard cap).
    pub max_candidates: usize,
    /// Worker pool size for concurrent batch runs.
    pub workers: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            master_timeout_secs: 12,
            nested_timeout_secs: 8,
            max_candidates: 3,
            workers: 20,
        }
    }
}

impl ProbeConfig {
    /// Timeout for the top-level master playlist fetch.
    pub fn master_timeout(&self) -> Duration {
        Duration::from_secs(self.master_timeout_secs)
    }

    /// Timeout for each nested candidate fetch.
    pub fn nested_timeout(&self) -> Duration {
        Duration::from_secs(self.nested_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("m3uprobe")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ProbeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ProbeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ProbeConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ProbeConfig::default();
        assert_eq!(cfg.master_timeout_secs, 12);
        assert_eq!(cfg.nested_timeout_secs, 8);
        assert_eq!(cfg.max_candidates, 3);
        assert_eq!(cfg.workers, 20);
        assert!(cfg.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ProbeConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ProbeConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.user_agent, cfg.user_agent);
        assert_eq!(parsed.master_timeout_secs, cfg.master_timeout_secs);
        assert_eq!(parsed.nested_timeout_secs, cfg.nested_timeout_secs);
        assert_eq!(parsed.max_candidates, cfg.max_candidates);
        assert_eq!(parsed.workers, cfg.workers);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            workers = 8
            master_timeout_secs = 5
        "#;
        let cfg: ProbeConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.workers, 8);
        assert_eq!(cfg.master_timeout_secs, 5);
        assert_eq!(cfg.nested_timeout_secs, 8);
        assert_eq!(cfg.max_candidates, 3);
    }

    #[test]
    fn timeouts_as_durations() {
        let cfg = ProbeConfig {
            master_timeout_secs: 3,
            nested_timeout_secs: 1,
            ..ProbeConfig::default()
        };
        assert_eq!(cfg.master_timeout(), Duration::from_secs(3));
        assert_eq!(cfg.nested_timeout(), Duration::from_secs(1));
    }
}
