//! Task pipelines.
//!
//! Turns a scenario snapshot into the ordered, bound list of resources
//! each task runs over.

mod builder;
mod task;

pub use builder::{
    BoundResource, BuildPipeline, NotificationPipelineBuilder, Pipeline, PipelineBuilder,
    PipelineFactory, PipelineTask,
};
pub use task::{sort_tasks, TaskKind, TASKLIST};
