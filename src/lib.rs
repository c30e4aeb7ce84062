pub mod config;
pub mod engine;
pub mod error;
pub mod log;
pub mod pipeline;
pub mod scenario;
pub mod value;

pub use error::{Error, Result};
pub use scenario::{FilterOptions, PipelineState, Scenario};
pub use value::Value;
