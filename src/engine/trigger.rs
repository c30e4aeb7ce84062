//! Trigger and selection filters over scenario resources.
//!
//! All filters take resource lists by value and hand back the kept subset
//! in the original order. None of them fail: no matches means an empty (or
//! unchanged) list.

use serde::{Deserialize, Serialize};

use crate::scenario::{Action, FilterOptions, Labeled, Notification};
use crate::{wlog_debug, Error};

/// Points in a run at which notifications may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyTrigger {
    /// Before a task runs.
    OnStart,
    /// After a task finishes, pass or fail.
    OnComplete,
    /// Only when requested explicitly.
    OnDemand,
}

/// Notification triggers in canonical order.
pub const NOTIFY_STATES: [NotifyTrigger; 3] = [
    NotifyTrigger::OnStart,
    NotifyTrigger::OnComplete,
    NotifyTrigger::OnDemand,
];

impl std::fmt::Display for NotifyTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyTrigger::OnStart => write!(f, "on_start"),
            NotifyTrigger::OnComplete => write!(f, "on_complete"),
            NotifyTrigger::OnDemand => write!(f, "on_demand"),
        }
    }
}

impl std::str::FromStr for NotifyTrigger {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        NOTIFY_STATES
            .into_iter()
            .find(|t| t.to_string() == s)
            .ok_or_else(|| Error::UnknownTrigger(s.to_string()))
    }
}

/// Resume from the first failed action.
///
/// Actions before the first failure already succeeded in a previous run
/// and are dropped. Without any failure the list is returned as is.
pub fn filter_actions_on_failed_status(mut actions: Vec<Action>) -> Vec<Action> {
    if let Some(first_failed) = actions.iter().position(Action::is_failed) {
        wlog_debug!(
            "Resuming from failed action {}, skipping {} earlier actions",
            actions[first_failed].name,
            first_failed
        );
        actions.drain(..first_failed);
    }
    actions
}

fn shares_label(resource: &impl Labeled, labels: &[String]) -> bool {
    resource.labels().iter().any(|l| labels.contains(l))
}

/// Keep resources matching `labels`, or drop those matching `skip_labels`.
pub fn filter_resources_by_label<T: Labeled>(resources: Vec<T>, options: &FilterOptions) -> Vec<T> {
    if !options.labels.is_empty() {
        resources
            .into_iter()
            .filter(|r| shares_label(r, &options.labels))
            .collect()
    } else if !options.skip_labels.is_empty() {
        resources
            .into_iter()
            .filter(|r| !shares_label(r, &options.skip_labels))
            .collect()
    } else {
        resources
    }
}

/// Drop notifications named in `skip_notify`.
pub fn filter_notifications_to_skip(
    notifications: Vec<Notification>,
    options: &FilterOptions,
) -> Vec<Notification> {
    if options.skip_notify.is_empty() {
        return notifications;
    }
    notifications
        .into_iter()
        .filter(|n| !options.skip_notify.contains(&n.name))
        .collect()
}

/// Select the notifications eligible to fire for `trigger`.
///
/// On demand notifications only ever fire for [`NotifyTrigger::OnDemand`].
/// For [`NotifyTrigger::OnComplete`] the result is, in order: success-only
/// notifications when nothing failed, failure-only notifications when
/// nothing passed, then notifications interested in either outcome.
pub fn filter_notifications_on_trigger(
    trigger: NotifyTrigger,
    notifications: Vec<Notification>,
    passed: &[String],
    failed: &[String],
) -> Vec<Notification> {
    let (on_demand, scheduled): (Vec<_>, Vec<_>) =
        notifications.into_iter().partition(|n| n.on_demand);

    let eligible = match trigger {
        NotifyTrigger::OnDemand => on_demand,
        NotifyTrigger::OnStart => scheduled
            .into_iter()
            .filter(|n| n.on_start && n.watches_any(passed))
            .collect(),
        NotifyTrigger::OnComplete => {
            let completed: Vec<Notification> =
                scheduled.into_iter().filter(|n| !n.on_start).collect();

            let success_only = completed.iter().filter(|n| {
                n.on_success && !n.on_failure && failed.is_empty() && n.watches_any(passed)
            });
            let failure_only = completed.iter().filter(|n| {
                n.on_failure && !n.on_success && passed.is_empty() && n.watches_any(failed)
            });
            let mixed = completed.iter().filter(|n| {
                n.on_success && n.on_failure && (n.watches_any(failed) || n.watches_any(passed))
            });

            success_only.chain(failure_only).chain(mixed).cloned().collect()
        }
    };

    wlog_debug!(
        "Trigger {}: {} notifications eligible ({:?})",
        trigger,
        eligible.len(),
        eligible.iter().map(|n| n.name.as_str()).collect::<Vec<_>>()
    );
    eligible
}
