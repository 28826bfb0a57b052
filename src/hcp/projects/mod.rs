//! Project module

mod api;
mod models;

pub use api::Projects;
pub use models::{
    Project, ProjectAttributes, ProjectCreateOptions, ProjectListOptions, ProjectUpdateOptions,
};
