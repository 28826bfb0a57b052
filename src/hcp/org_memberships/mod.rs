//! Organization membership module

mod api;
mod models;

pub use api::OrganizationMemberships;
pub use models::{
    MembershipStatus, OrganizationMembership, OrganizationMembershipAttributes,
    OrganizationMembershipCreateOptions, OrganizationMembershipListOptions,
    OrganizationMembershipRelationships,
};
