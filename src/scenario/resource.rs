//! Scenario resources: hosts, actions, executes, reports and notifications.
//!
//! These are produced by scenario parsing and handed to the engine
//! read-only. Task-bearing resources (actions, executes, reports) declare
//! references to other resources by name; resolution binds them.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::pipeline::TASKLIST;
use crate::value::{Mapping, Value};

/// Status code an action carries once its orchestrate step has failed.
pub const STATUS_FAILED: i32 = 1;

/// Resources addressable by name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Resources carrying labels for `--label`/`--skip-label` selection.
pub trait Labeled {
    fn labels(&self) -> &[String];
}

/// A declared reference to another resource.
///
/// Scenario documents name resources with plain strings ("web01", a group
/// name, or "all"). Once bound, the reference holds the resource itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Name(String),
    Bound(T),
}

impl<T: Named> Reference<T> {
    /// The referenced name, whether bound or not.
    pub fn name(&self) -> &str {
        match self {
            Reference::Name(name) => name,
            Reference::Bound(resource) => resource.name(),
        }
    }

    pub fn is_name(&self) -> bool {
        matches!(self, Reference::Name(_))
    }

    pub fn bound(&self) -> Option<&T> {
        match self {
            Reference::Bound(resource) => Some(resource),
            Reference::Name(_) => None,
        }
    }
}

impl<T> From<&str> for Reference<T> {
    fn from(name: &str) -> Self {
        Reference::Name(name.to_string())
    }
}

/// A provisioned (or to-be-provisioned) machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Everything else: addresses, metadata, provider fields.
    #[serde(flatten)]
    pub attributes: Mapping,
}

impl Host {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            groups: Vec::new(),
            labels: Vec::new(),
            attributes: Mapping::new(),
        }
    }

    pub fn with_groups(mut self, groups: &[&str]) -> Self {
        self.groups = groups.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Look up an attribute by name, including the typed fields.
    pub fn attribute(&self, key: &str) -> Option<Cow<'_, Value>> {
        match key {
            "name" => Some(Cow::Owned(Value::from(self.name.as_str()))),
            "groups" => Some(Cow::Owned(Value::from(self.groups.as_slice()))),
            "labels" => Some(Cow::Owned(Value::from(self.labels.as_slice()))),
            _ => self.attributes.get(key).map(Cow::Borrowed),
        }
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// Resources whose tasks run against a set of hosts.
pub trait HostBound: Sized {
    fn host_refs(&self) -> &[Reference<Host>];

    /// Replace the host references and record the full host list.
    fn with_hosts(self, hosts: Vec<Reference<Host>>, all_hosts: Vec<Host>) -> Self;
}

/// An orchestrate step run against hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// 0 while pending or passed, [`STATUS_FAILED`] after a failure.
    #[serde(default)]
    pub status: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orchestrator: Option<String>,
    #[serde(default)]
    pub hosts: Vec<Reference<Host>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_hosts: Vec<Host>,
    /// Teardown definition; only actions carrying one join the cleanup pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<Value>,
    #[serde(flatten)]
    pub attributes: Mapping,
}

impl Action {
    pub fn new(name: &str, hosts: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            labels: Vec::new(),
            status: 0,
            orchestrator: None,
            hosts: hosts.iter().map(|h| Reference::from(*h)).collect(),
            all_hosts: Vec::new(),
            cleanup: None,
            attributes: Mapping::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == STATUS_FAILED
    }
}

impl HostBound for Action {
    fn host_refs(&self) -> &[Reference<Host>] {
        &self.hosts
    }

    fn with_hosts(mut self, hosts: Vec<Reference<Host>>, all_hosts: Vec<Host>) -> Self {
        self.hosts = hosts;
        self.all_hosts = all_hosts;
        self
    }
}

/// A test execution step run against hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execute {
    pub name: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor: Option<String>,
    #[serde(default)]
    pub hosts: Vec<Reference<Host>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_hosts: Vec<Host>,
    #[serde(flatten)]
    pub attributes: Mapping,
}

impl Execute {
    pub fn new(name: &str, hosts: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            labels: Vec::new(),
            executor: None,
            hosts: hosts.iter().map(|h| Reference::from(*h)).collect(),
            all_hosts: Vec::new(),
            attributes: Mapping::new(),
        }
    }
}

impl HostBound for Execute {
    fn host_refs(&self) -> &[Reference<Host>] {
        &self.hosts
    }

    fn with_hosts(mut self, hosts: Vec<Reference<Host>>, all_hosts: Vec<Host>) -> Self {
        self.hosts = hosts;
        self.all_hosts = all_hosts;
        self
    }
}

/// A result-import step referencing the executes that produced its artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importer: Option<String>,
    #[serde(default)]
    pub executes: Vec<Reference<Execute>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_hosts: Vec<Host>,
    #[serde(flatten)]
    pub attributes: Mapping,
}

impl Report {
    pub fn new(name: &str, executes: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            labels: Vec::new(),
            importer: None,
            executes: executes.iter().map(|e| Reference::from(*e)).collect(),
            all_hosts: Vec::new(),
            attributes: Mapping::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_on_tasks() -> Vec<String> {
    TASKLIST.iter().map(|t| t.to_string()).collect()
}

/// A notification and the trigger predicates deciding when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub name: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifier: Option<String>,
    #[serde(default)]
    pub on_start: bool,
    #[serde(default)]
    pub on_complete: bool,
    #[serde(default)]
    pub on_demand: bool,
    #[serde(default = "default_true")]
    pub on_success: bool,
    #[serde(default = "default_true")]
    pub on_failure: bool,
    /// Task names whose outcome this notification reports on.
    #[serde(default = "default_on_tasks")]
    pub on_tasks: Vec<String>,
    #[serde(flatten)]
    pub attributes: Mapping,
}

impl Notification {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            labels: Vec::new(),
            notifier: None,
            on_start: false,
            on_complete: false,
            on_demand: false,
            on_success: true,
            on_failure: true,
            on_tasks: default_on_tasks(),
            attributes: Mapping::new(),
        }
    }

    pub fn with_tasks(mut self, tasks: &[&str]) -> Self {
        self.on_tasks = tasks.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Whether any of `tasks` is one this notification watches.
    pub fn watches_any(&self, tasks: &[String]) -> bool {
        self.on_tasks.iter().any(|t| tasks.contains(t))
    }
}

macro_rules! impl_named_labeled {
    ($($ty:ty),*) => {
        $(
            impl Named for $ty {
                fn name(&self) -> &str {
                    &self.name
                }
            }

            impl Labeled for $ty {
                fn labels(&self) -> &[String] {
                    &self.labels
                }
            }
        )*
    };
}

impl_named_labeled!(Host, Action, Execute, Report, Notification);
