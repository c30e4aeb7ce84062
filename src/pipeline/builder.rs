//! Pipeline construction.
//!
//! A pipeline is the list of resources one task runs over. Building it
//! narrows the scenario by labels, resumes orchestration from the first
//! failed action, and binds every resource's references so the executing
//! task receives concrete hosts and executes.

use serde::Serialize;

use crate::config::Config;
use crate::engine::{
    filter_actions_on_failed_status, filter_notifications_on_trigger,
    filter_notifications_to_skip, filter_resources_by_label, NotifyTrigger, Resolver,
};
use crate::scenario::{Action, Execute, FilterOptions, Host, Notification, Report, Scenario};
use crate::{wlog, Error, Result};

use super::task::TaskKind;

/// A resource ready to be handed to its task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundResource {
    Host(Host),
    Action(Action),
    Execute(Execute),
    Report(Report),
    Notification(Notification),
}

impl BoundResource {
    pub fn name(&self) -> &str {
        match self {
            BoundResource::Host(r) => &r.name,
            BoundResource::Action(r) => &r.name,
            BoundResource::Execute(r) => &r.name,
            BoundResource::Report(r) => &r.name,
            BoundResource::Notification(r) => &r.name,
        }
    }
}

/// One unit of work in a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineTask {
    pub task: TaskKind,
    pub resource: BoundResource,
    /// Whether this task may run alongside the others in its pipeline.
    pub concurrent: bool,
}

/// Everything one task runs over, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pipeline {
    pub name: String,
    pub task: TaskKind,
    pub tasks: Vec<PipelineTask>,
}

impl Pipeline {
    fn new(task: TaskKind) -> Self {
        Self {
            name: task.to_string(),
            task,
            tasks: Vec::new(),
        }
    }

    fn push(&mut self, resource: BoundResource, concurrent: bool) {
        self.tasks.push(PipelineTask {
            task: self.task,
            resource,
            concurrent,
        });
    }

    /// Names of the resources in this pipeline, in order.
    pub fn resource_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.resource.name()).collect()
    }
}

/// Builds a pipeline from a scenario.
pub trait BuildPipeline {
    /// The pipeline name requested.
    fn name(&self) -> &str;

    /// Whether the requested name is one this builder can build.
    fn is_task_valid(&self) -> bool;

    fn build(&self, scenario: &Scenario, options: &FilterOptions, config: &Config)
        -> Result<Pipeline>;
}

/// Picks the builder for a task name or notification trigger.
pub struct PipelineFactory;

impl PipelineFactory {
    pub fn get_pipeline(name: &str) -> Box<dyn BuildPipeline> {
        match name.parse::<TaskKind>() {
            Ok(kind) if kind.is_pipeline_task() => Box::new(PipelineBuilder::new(name)),
            _ => Box::new(NotificationPipelineBuilder::new(name)),
        }
    }
}

/// Builder for the run-order tasks (validate through cleanup).
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    name: String,
}

impl PipelineBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// The task kind this builder's name stands for.
    pub fn task_kind(&self) -> Result<TaskKind> {
        self.name
            .parse::<TaskKind>()
            .ok()
            .filter(TaskKind::is_pipeline_task)
            .ok_or_else(|| Error::UnknownTask(self.name.clone()))
    }
}

impl BuildPipeline for PipelineBuilder {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_task_valid(&self) -> bool {
        self.task_kind().is_ok()
    }

    fn build(
        &self,
        scenario: &Scenario,
        options: &FilterOptions,
        config: &Config,
    ) -> Result<Pipeline> {
        let kind = self.task_kind()?;
        let concurrent = config.task_concurrency.for_task(kind);
        let resolver = Resolver::new(&scenario.hosts)
            .with_executes(&scenario.executes)
            .strict_executes(config.strict_execute_refs);
        let mut pipeline = Pipeline::new(kind);

        if matches!(kind, TaskKind::Validate | TaskKind::Provision | TaskKind::Cleanup) {
            for host in filter_resources_by_label(scenario.hosts.clone(), options) {
                pipeline.push(BoundResource::Host(host), concurrent);
            }
        }

        if matches!(kind, TaskKind::Validate | TaskKind::Orchestrate | TaskKind::Cleanup) {
            // Cleanup tears down everything, including actions that already ran.
            let actions = if kind == TaskKind::Cleanup {
                scenario.actions.clone()
            } else {
                filter_actions_on_failed_status(scenario.actions.clone())
            };
            for action in filter_resources_by_label(actions, options) {
                if kind == TaskKind::Cleanup && action.cleanup.is_none() {
                    continue;
                }
                pipeline.push(BoundResource::Action(resolver.bind_hosts(action)), concurrent);
            }
        }

        if matches!(kind, TaskKind::Validate | TaskKind::Execute) {
            for execute in filter_resources_by_label(scenario.executes.clone(), options) {
                pipeline.push(BoundResource::Execute(resolver.bind_hosts(execute)), concurrent);
            }
        }

        if matches!(kind, TaskKind::Validate | TaskKind::Report) {
            for report in filter_resources_by_label(scenario.reports.clone(), options) {
                pipeline.push(BoundResource::Report(resolver.bind_executes(report)?), concurrent);
            }
        }

        if kind == TaskKind::Validate {
            for notification in filter_notifications_to_skip(scenario.notifications.clone(), options)
            {
                pipeline.push(BoundResource::Notification(notification), concurrent);
            }
        }

        if kind == TaskKind::Cleanup {
            pipeline.tasks.reverse();
        }

        wlog!(
            "Built {} pipeline with {} tasks (concurrent={})",
            pipeline.name,
            pipeline.tasks.len(),
            concurrent
        );
        Ok(pipeline)
    }
}

/// Builder for the notify pipeline of one trigger.
#[derive(Debug, Clone)]
pub struct NotificationPipelineBuilder {
    trigger: String,
}

impl NotificationPipelineBuilder {
    pub fn new(trigger: &str) -> Self {
        Self {
            trigger: trigger.to_string(),
        }
    }

    pub fn trigger(&self) -> Result<NotifyTrigger> {
        self.trigger.parse()
    }
}

impl BuildPipeline for NotificationPipelineBuilder {
    fn name(&self) -> &str {
        TaskKind::Notify.as_str()
    }

    fn is_task_valid(&self) -> bool {
        self.trigger().is_ok()
    }

    fn build(
        &self,
        scenario: &Scenario,
        options: &FilterOptions,
        config: &Config,
    ) -> Result<Pipeline> {
        let trigger = self.trigger()?;
        let concurrent = config.task_concurrency.for_task(TaskKind::Notify);
        let mut pipeline = Pipeline::new(TaskKind::Notify);

        let notifications = filter_notifications_to_skip(scenario.notifications.clone(), options);
        let notifications = filter_notifications_on_trigger(
            trigger,
            notifications,
            &scenario.state.passed_tasks,
            &scenario.state.failed_tasks,
        );
        for notification in notifications {
            pipeline.push(BoundResource::Notification(notification), concurrent);
        }

        wlog!(
            "Built notify pipeline for {} with {} tasks (run failed: {})",
            trigger,
            pipeline.tasks.len(),
            scenario.state.has_failures()
        );
        Ok(pipeline)
    }
}
