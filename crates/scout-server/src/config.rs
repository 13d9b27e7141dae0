//! Server configuration – `scout.toml` plus `SCOUT_*` env overrides.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Runtime configuration for the scout server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Path of the credential file (username → bcrypt hash).
    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_users_file() -> PathBuf {
    PathBuf::from("users.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            users_file: default_users_file(),
        }
    }
}

impl Config {
    /// Load the config from `path`, falling back to defaults when the file
    /// does not exist.  Env overrides are applied either way.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut cfg = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config at {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("could not parse config at {}", path.display()))?
        } else {
            Self::default()
        };
        apply_env_overrides(&mut cfg);
        Ok(cfg)
    }
}

/// Apply `SCOUT_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `SCOUT_LISTEN` | `listen_addr` |
/// | `SCOUT_USERS_FILE` | `users_file` |
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("SCOUT_LISTEN") {
        cfg.listen_addr = v;
    }
    if let Ok(v) = std::env::var("SCOUT_USERS_FILE") {
        cfg.users_file = PathBuf::from(v);
    }
}
