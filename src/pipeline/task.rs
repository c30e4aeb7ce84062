//! Pipeline task kinds and their canonical run order.

use serde::{Deserialize, Serialize};

use crate::engine::NotifyTrigger;
use crate::{Error, Result};

/// The kinds of task a scenario run is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Validate,
    Provision,
    Orchestrate,
    Execute,
    Report,
    Cleanup,
    /// Sends notifications; driven by triggers rather than run order.
    Notify,
}

/// Pipeline tasks in the order a full run executes them.
pub const TASKLIST: [TaskKind; 6] = [
    TaskKind::Validate,
    TaskKind::Provision,
    TaskKind::Orchestrate,
    TaskKind::Execute,
    TaskKind::Report,
    TaskKind::Cleanup,
];

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Validate => "validate",
            TaskKind::Provision => "provision",
            TaskKind::Orchestrate => "orchestrate",
            TaskKind::Execute => "execute",
            TaskKind::Report => "report",
            TaskKind::Cleanup => "cleanup",
            TaskKind::Notify => "notify",
        }
    }

    /// Whether this kind has its own slot in [`TASKLIST`].
    pub fn is_pipeline_task(&self) -> bool {
        TASKLIST.contains(self)
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TASKLIST
            .into_iter()
            .chain(std::iter::once(TaskKind::Notify))
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownTask(s.to_string()))
    }
}

/// Order requested task names canonically.
///
/// Names are pipeline tasks (validate ... cleanup) or, failing that,
/// notification triggers (on_start, on_complete, on_demand).
pub fn sort_tasks<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>> {
    let as_tasks: std::result::Result<Vec<TaskKind>, _> = names
        .iter()
        .map(|n| {
            n.as_ref()
                .parse::<TaskKind>()
                .ok()
                .filter(TaskKind::is_pipeline_task)
                .ok_or_else(|| n.as_ref().to_string())
        })
        .collect();

    match as_tasks {
        Ok(mut tasks) => {
            tasks.sort();
            Ok(tasks.iter().map(ToString::to_string).collect())
        }
        Err(_) => {
            let mut triggers = names
                .iter()
                .map(|n| {
                    n.as_ref()
                        .parse::<NotifyTrigger>()
                        .map_err(|_| Error::UnknownTask(n.as_ref().to_string()))
                })
                .collect::<Result<Vec<_>>>()?;
            triggers.sort();
            Ok(triggers.iter().map(ToString::to_string).collect())
        }
    }
}
