//! Tag data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Tag data from TFE API (organization tags and workspace tags)
#[derive(Deserialize, Debug, Clone)]
pub struct Tag {
    pub id: String,
    pub attributes: TagAttributes,
}

impl TfeResource for Tag {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Tag attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct TagAttributes {
    pub name: String,
    /// Number of workspaces carrying the tag (organization tags only)
    #[serde(rename = "instance-count", default)]
    pub instance_count: u32,
    #[serde(rename = "created-at", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A tag referenced by ID or by name when adding or removing tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagRef {
    Id(String),
    Name(String),
}

impl TagRef {
    pub fn name(name: impl Into<String>) -> Self {
        TagRef::Name(name.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        TagRef::Id(id.into())
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            TagRef::Id(v) | TagRef::Name(v) => v.is_empty(),
        }
    }
}

impl Serialize for TagRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            TagRef::Id(id) => serde_json::json!({"type": "tags", "id": id}),
            TagRef::Name(name) => serde_json::json!({"type": "tags", "attributes": {"name": name}}),
        };
        value.serialize(serializer)
    }
}

/// Query options for listing organization tags
#[derive(Default, Debug, Clone)]
pub struct OrganizationTagsListOptions {
    pub list: ListOptions,
    /// Search tag names (`q`)
    pub query: Option<String>,
    /// Exclude tags already on this workspace (`filter[exclude][taggable][id]`)
    pub exclude_taggable_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_deserialization() {
        let json = r#"{
            "id": "tag-abc",
            "type": "tags",
            "attributes": {"name": "prod", "instance-count": 3, "created-at": "2024-01-01T00:00:00Z"}
        }"#;
        let tag: Tag = serde_json::from_str(json).unwrap();
        assert_eq!(tag.name(), "prod");
        assert_eq!(tag.attributes.instance_count, 3);
    }

    #[test]
    fn test_workspace_tag_without_count() {
        let tag: Tag =
            serde_json::from_str(r#"{"id": "tag-1", "attributes": {"name": "dev"}}"#).unwrap();
        assert_eq!(tag.attributes.instance_count, 0);
        assert!(tag.attributes.created_at.is_none());
    }

    #[test]
    fn test_tag_ref_serialization() {
        assert_eq!(
            serde_json::to_value(TagRef::id("tag-1")).unwrap(),
            serde_json::json!({"type": "tags", "id": "tag-1"})
        );
        assert_eq!(
            serde_json::to_value(TagRef::name("prod")).unwrap(),
            serde_json::json!({"type": "tags", "attributes": {"name": "prod"}})
        );
        assert!(TagRef::name("").is_empty());
    }
}
