//! Integration test suite for weft.
//!
//! These tests drive the engine the way a scenario runner does: load a
//! scenario snapshot, build pipelines task by task, inject host data into
//! the bound resources, and fire notifications from the recorded run
//! state.
//!
//! # Test Categories
//!
//! - `resolution`: Reference binding against a realistic host inventory
//! - `injection`: Command and parameter rendering from bound hosts
//! - `notifications`: Trigger evaluation across a run
//! - `scenario_run`: A full provision-to-cleanup pass including resumption

mod fixtures;

mod injection;
mod resolution;
mod scenario_run;
