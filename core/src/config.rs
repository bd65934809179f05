use crate::error::CoreResult;
use crate::store::loader::TableSources;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATHS: &[&str] = &["./unblocker.toml", "/etc/unblocker/unblocker.toml"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_incidents_file")]
    pub incidents_file: String,
    #[serde(default = "default_registry_file")]
    pub registry_file: String,
    #[serde(default = "default_friction_file")]
    pub friction_file: String,
    #[serde(default = "default_actions_file")]
    pub actions_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "default_actor")]
    pub default_actor: String,
    #[serde(default = "default_tail")]
    pub tail: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            incidents_file: default_incidents_file(),
            registry_file: default_registry_file(),
            friction_file: default_friction_file(),
            actions_file: default_actions_file(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            default_actor: default_actor(),
            tail: default_tail(),
        }
    }
}

impl DataConfig {
    pub fn sources(&self) -> TableSources {
        TableSources {
            incidents: self.dir.join(&self.incidents_file),
            registry: self.dir.join(&self.registry_file),
            friction: self.dir.join(&self.friction_file),
            actions: self.dir.join(&self.actions_file),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `config_path` if given, otherwise the first default location
    /// that exists, otherwise built-in defaults.
    pub fn load(config_path: Option<&Path>) -> CoreResult<Self> {
        if let Some(path) = config_path {
            log::info!("loading config from {}", path.display());
            return Self::from_file(path);
        }
        for path in DEFAULT_CONFIG_PATHS {
            if Path::new(path).exists() {
                log::info!("loading config from {}", path);
                return Self::from_file(path);
            }
        }
        log::debug!(
            "no config file found, using defaults (searched: {:?})",
            DEFAULT_CONFIG_PATHS
        );
        Ok(Self::default())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_incidents_file() -> String {
    "incidents.csv".to_string()
}

fn default_registry_file() -> String {
    "ownership_registry.csv".to_string()
}

fn default_friction_file() -> String {
    "friction_data.csv".to_string()
}

fn default_actions_file() -> String {
    "action_log.csv".to_string()
}

fn default_actor() -> String {
    "Demo User".to_string()
}

fn default_tail() -> usize {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [data]
            dir = "/srv/unblocker"
            friction_file = "friction.csv"

            [audit]
            tail = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.data.dir, PathBuf::from("/srv/unblocker"));
        assert_eq!(cfg.data.incidents_file, "incidents.csv");
        assert_eq!(cfg.audit.default_actor, "Demo User");
        assert_eq!(cfg.audit.tail, 5);

        let sources = cfg.data.sources();
        assert_eq!(sources.friction, PathBuf::from("/srv/unblocker/friction.csv"));
        assert_eq!(sources.actions, PathBuf::from("/srv/unblocker/action_log.csv"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
