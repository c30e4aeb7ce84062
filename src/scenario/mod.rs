//! Scenario data model.
//!
//! Resources, their declared references, and the per-run state the
//! engine evaluates triggers against.

pub mod graph;
pub mod resource;
pub mod state;

pub use graph::Scenario;
pub use resource::{
    Action, Execute, Host, HostBound, Labeled, Named, Notification, Reference, Report,
    STATUS_FAILED,
};
pub use state::{FilterOptions, PipelineState};
