use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::emit::DEFAULT_REGENERATE_COMMAND;
use crate::enumerate::DEFAULT_SKIPPED_VERSIONS;
use crate::output::OutputTarget;
use crate::release::{HttpOptions, DEFAULT_BASE_URL};
use crate::version::Version;

/// Release server settings loaded from `~/.config/bazel-hashes/config.toml`.
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Root of the release tree, e.g. `http://releases.bazel.build`.
    pub base_url: String,
    /// Printed in the header of the generated file, before the arguments.
    pub regenerate_command: String,
    /// Versions that were never cut and must not end the walk.
    pub skipped_versions: Vec<Version>,
    /// Connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds (None = no limit).
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            regenerate_command: DEFAULT_REGENERATE_COMMAND.to_string(),
            skipped_versions: DEFAULT_SKIPPED_VERSIONS.to_vec(),
            connect_timeout_secs: None,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ReleaseConfig {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Everything one run needs. Built once from flags + config file, then only
/// borrowed.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output: OutputTarget,
    pub map_name: String,
    pub minimum_version: Version,
    /// Invocation arguments without the program name, for the header.
    pub args: Vec<String>,
    pub release: ReleaseConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bazel-hashes")?;
    Ok(xdg_dirs
        .get_config_home()
        .join("bazel-hashes")
        .join("config.toml"))
}

/// Load configuration. An explicit `path` must exist; the default location
/// is optional and falls back to built-in defaults.
pub fn load(path: Option<&Path>) -> Result<ReleaseConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = config_path()?;
            if !p.exists() {
                tracing::debug!("no config at {}, using defaults", p.display());
                return Ok(ReleaseConfig::default());
            }
            p
        }
    };
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<ReleaseConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: ReleaseConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
