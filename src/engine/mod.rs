//! Runtime resolution and trigger evaluation.
//!
//! This module binds declared references to scenario resources, injects
//! host data into command strings, and decides which notifications and
//! actions proceed given the run state.

mod inject;
mod resolver;
mod trigger;

pub use inject::{is_foreign_query, DataInjector};
pub use resolver::{resolve_executes, resolve_hosts, HostTargets, Resolver, ALL_HOSTS};
pub use trigger::{
    filter_actions_on_failed_status, filter_notifications_on_trigger, filter_notifications_to_skip,
    filter_resources_by_label, NotifyTrigger, NOTIFY_STATES,
};
