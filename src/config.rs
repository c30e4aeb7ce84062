use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::TaskKind;
use crate::{wlog_debug, Error, Result};

fn default_true() -> bool {
    true
}

/// Whether each pipeline's tasks may run concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConcurrency {
    #[serde(default = "default_true")]
    pub validate: bool,
    #[serde(default = "default_true")]
    pub provision: bool,
    #[serde(default)]
    pub orchestrate: bool,
    #[serde(default)]
    pub execute: bool,
    #[serde(default)]
    pub report: bool,
    #[serde(default)]
    pub cleanup: bool,
    #[serde(default)]
    pub notify: bool,
}

impl Default for TaskConcurrency {
    fn default() -> Self {
        Self {
            validate: true,
            provision: true,
            orchestrate: false,
            execute: false,
            report: false,
            cleanup: false,
            notify: false,
        }
    }
}

impl TaskConcurrency {
    pub fn for_task(&self, kind: TaskKind) -> bool {
        match kind {
            TaskKind::Validate => self.validate,
            TaskKind::Provision => self.provision,
            TaskKind::Orchestrate => self.orchestrate,
            TaskKind::Execute => self.execute,
            TaskKind::Report => self.report,
            TaskKind::Cleanup => self.cleanup,
            TaskKind::Notify => self.notify,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub task_concurrency: TaskConcurrency,
    /// Reports whose execute references match nothing fail instead of
    /// receiving every host.
    #[serde(default)]
    pub strict_execute_refs: bool,
}

impl Config {
    pub fn weft_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".weft"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::weft_dir()?.join("weft.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        wlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            wlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        wlog_debug!(
            "Config loaded: task_concurrency={:?}, strict_execute_refs={}",
            config.task_concurrency,
            config.strict_execute_refs
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                wlog_debug!("Creating config directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        wlog_debug!("Config saved to {}", path.display());
        Ok(())
    }
}
