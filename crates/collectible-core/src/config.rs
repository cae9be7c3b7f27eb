use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Filter used when neither `RUST_LOG` nor the config file provides one.
pub const DEFAULT_LOG_FILTER: &str = "info,collectible=debug,collectible_core=debug";

/// Keyword lists driving the collectible tally (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// An entity is a candidate when its lowercase name contains one of these.
    pub collectible_keywords: Vec<String>,
    /// Candidates whose lowercase name contains one of these are counted as excluded.
    pub excluded_keywords: Vec<String>,
}

impl Default for TallyConfig {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            collectible_keywords: owned(&[
                "berry",
                "heart",
                "cassette",
                "miniheart",
                "blackgem",
                "memorialtextcontroller",
                "key",
            ]),
            excluded_keywords: owned(&["block", "door", "gate", "fake", "respawn", "berrytoflag"]),
        }
    }
}

/// Global configuration loaded from `~/.config/collectible/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
    pub tally: TallyConfig,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            tally: TallyConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("collectible")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Result of [`load_or_init`]: the config and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: CollectibleConfig,
    pub path: PathBuf,
    /// True when the file did not exist and a default one was written.
    pub created: bool,
}

/// Load configuration from the XDG location, creating a default file if none exists.
/// Does not log; the caller reports `created` once logging is up.
pub fn load_or_init() -> Result<LoadedConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<LoadedConfig> {
    let created = !path.exists();
    let config = if created {
        let default_cfg = CollectibleConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        default_cfg
    } else {
        load_from(path)?
    };
    Ok(LoadedConfig {
        config,
        path: path.to_path_buf(),
        created,
    })
}

pub fn load_from(path: &Path) -> Result<CollectibleConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: CollectibleConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = CollectibleConfig::default();
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(cfg.tally.collectible_keywords.len(), 7);
        assert!(cfg.tally.collectible_keywords.contains(&"blackgem".to_string()));
        assert!(cfg.tally.excluded_keywords.contains(&"berrytoflag".to_string()));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = CollectibleConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: CollectibleConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            log_filter = "warn"
        "#;
        let cfg: CollectibleConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.log_filter, "warn");
        assert_eq!(cfg.tally, TallyConfig::default());
    }

    #[test]
    fn config_toml_custom_keywords() {
        let toml = r#"
            [tally]
            collectible_keywords = ["berry"]
        "#;
        let cfg: CollectibleConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(cfg.tally.collectible_keywords, vec!["berry".to_string()]);
        assert_eq!(
            cfg.tally.excluded_keywords,
            TallyConfig::default().excluded_keywords
        );
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let first = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert!(first.created);
        assert_eq!(first.path, path);
        assert_eq!(first.config, CollectibleConfig::default());

        fs::write(&path, "log_filter = \"debug\"\n").unwrap();
        let reloaded = load_or_init_at(&path).unwrap();
        assert!(!reloaded.created);
        assert_eq!(reloaded.config.log_filter, "debug");
    }

    #[test]
    fn load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_filter = [").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(crate::Error::ConfigParse(_))
        ));
    }
}
