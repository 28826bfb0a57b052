//! Organization module

mod api;
mod models;

pub use api::{OrganizationTokens, Organizations};
pub use models::{
    Capacity, CapacityAttributes, EntitlementAttributes, Entitlements, Organization,
    OrganizationAttributes, OrganizationCreateOptions, OrganizationListOptions,
    OrganizationPermissions, OrganizationRelationships, OrganizationToken,
    OrganizationTokenAttributes, OrganizationTokenCreateOptions, OrganizationUpdateOptions,
};
