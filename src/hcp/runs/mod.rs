//! Runs module

mod api;
mod models;
mod plans;

pub use api::Runs;
pub use models::{
    Apply, ApplyAttributes, Plan, PlanAttributes, Run, RunActionOptions, RunActions,
    RunAttributes, RunCreateOptions, RunEvent, RunEventAttributes, RunEventRelationships,
    RunListOptions, RunRelationships, RunStatus, RunVariable,
};
pub use plans::{Applies, Plans};
