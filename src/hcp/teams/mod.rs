//! Team module

mod access;
mod api;
mod models;

pub use access::TeamAccessService;
pub use api::{TeamMembers, Teams};
pub use models::{
    AccessType, CustomWorkspacePermissions, OrganizationAccess, Team, TeamAccess,
    TeamAccessAddOptions, TeamAccessAttributes, TeamAccessRelationships, TeamAccessUpdateOptions,
    TeamAttributes, TeamCreateOptions, TeamListOptions, TeamMemberOptions, TeamPermissions,
    TeamRelationships, TeamUpdateOptions,
};
