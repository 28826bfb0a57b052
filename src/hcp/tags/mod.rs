//! Organization tag module

mod api;
mod models;

pub use api::OrganizationTags;
pub use models::{OrganizationTagsListOptions, Tag, TagAttributes, TagRef};
