//! The resource graph handed to the engine by scenario parsing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{wlog_debug, Result};

use super::resource::{Action, Execute, Host, Notification, Report};
use super::state::PipelineState;

/// Snapshot of a parsed scenario: its resources plus the run state so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub executes: Vec<Execute>,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(flatten)]
    pub state: PipelineState,
}

impl Scenario {
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        wlog_debug!("Scenario::load path={}", path.display());
        let scenario = Self::from_json(&fs::read_to_string(path)?)?;
        wlog_debug!(
            "Scenario {:?} loaded: hosts={}, actions={}, executes={}, reports={}, notifications={}",
            scenario.name,
            scenario.hosts.len(),
            scenario.actions.len(),
            scenario.executes.len(),
            scenario.reports.len(),
            scenario.notifications.len()
        );
        Ok(scenario)
    }
}
