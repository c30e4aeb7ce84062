//! Per-run execution state and run-time selection options.

use serde::{Deserialize, Serialize};

/// Which tasks have passed or failed so far in the current run.
///
/// Both lists keep completion order. The driver appends to them after
/// each task; the engine only reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    #[serde(default)]
    pub passed_tasks: Vec<String>,
    #[serde(default)]
    pub failed_tasks: Vec<String>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_passed(&mut self, task: &str) {
        self.passed_tasks.push(task.to_string());
    }

    pub fn record_failed(&mut self, task: &str) {
        self.failed_tasks.push(task.to_string());
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_tasks.is_empty()
    }
}

/// Options supplied with a run that narrow which resources take part.
///
/// `labels` and `skip_labels` are mutually exclusive; when both are set
/// `labels` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub skip_labels: Vec<String>,
    #[serde(default)]
    pub skip_notify: Vec<String>,
}

impl FilterOptions {
    pub fn with_labels(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_skip_labels(labels: &[&str]) -> Self {
        Self {
            skip_labels: labels.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_skip_notify(names: &[&str]) -> Self {
        Self {
            skip_notify: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }
}
