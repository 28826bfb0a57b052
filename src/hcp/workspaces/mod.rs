//! Workspace module

mod api;
mod models;

pub use api::Workspaces;
pub use models::{
    VcsRepo, VcsRepoOptions, Workspace, WorkspaceAttributes, WorkspaceCreateOptions,
    WorkspaceListOptions, WorkspaceLockOptions, WorkspacePermissions, WorkspaceRelationships,
    WorkspaceSettings, WorkspaceUpdateOptions,
};
