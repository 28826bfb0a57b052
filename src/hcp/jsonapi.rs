//! JSON:API envelopes
//!
//! Request bodies are built with [`RequestDocument`]; responses are read
//! through [`Document`] and [`crate::hcp::traits::ApiListResponse`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Single-resource response document
#[derive(Deserialize, Debug)]
pub struct Document<T> {
    pub data: T,
    #[serde(default)]
    pub included: Vec<Value>,
}

/// Generic to-one relationship
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RelationshipData {
    #[serde(default)]
    pub data: Option<RelationshipId>,
}

impl RelationshipData {
    pub fn to(rel_type: &str, id: &str) -> Self {
        Self {
            data: Some(RelationshipId::new(rel_type, id)),
        }
    }

    /// ID of the related resource, if set
    pub fn id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.id.as_str())
    }
}

/// Generic to-many relationship
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RelationshipList {
    #[serde(default)]
    pub data: Vec<RelationshipId>,
}

impl RelationshipList {
    /// Build a `{"data": [{"type": .., "id": ..}, ..]}` body
    pub fn of<I, S>(rel_type: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            data: ids
                .into_iter()
                .map(|id| RelationshipId::new(rel_type, id.as_ref()))
                .collect(),
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        self.data.iter().map(|d| d.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Relationship ID reference
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RelationshipId {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub rel_type: Option<String>,
}

impl RelationshipId {
    pub fn new(rel_type: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            rel_type: Some(rel_type.to_string()),
        }
    }
}

/// JSON:API request body wrapping one resource object
#[derive(Serialize, Debug)]
pub struct RequestDocument<A> {
    pub data: ResourceObject<A>,
}

/// The resource object inside a request body
#[derive(Serialize, Debug)]
pub struct ResourceObject<A> {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub attributes: A,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub relationships: Map<String, Value>,
}

impl<A: Serialize> RequestDocument<A> {
    pub fn new(resource_type: &str, attributes: A) -> Self {
        Self {
            data: ResourceObject {
                resource_type: resource_type.to_string(),
                id: None,
                attributes,
                relationships: Map::new(),
            },
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.data.id = Some(id.to_string());
        self
    }

    /// Attach a to-one relationship
    pub fn relate_one(mut self, name: &str, rel_type: &str, id: &str) -> Self {
        self.data.relationships.insert(
            name.to_string(),
            serde_json::json!({ "data": { "type": rel_type, "id": id } }),
        );
        self
    }

    /// Attach a to-one relationship only when `id` is present
    pub fn relate_opt(self, name: &str, rel_type: &str, id: Option<&str>) -> Self {
        match id {
            Some(id) => self.relate_one(name, rel_type, id),
            None => self,
        }
    }

    /// Attach a to-many relationship
    pub fn relate_many<I, S>(mut self, name: &str, rel_type: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let data: Vec<Value> = ids
            .into_iter()
            .map(|id| serde_json::json!({ "type": rel_type, "id": id.as_ref() }))
            .collect();
        self.data
            .relationships
            .insert(name.to_string(), serde_json::json!({ "data": data }));
        self
    }

    /// Explicitly clear a to-one relationship (`"data": null`)
    pub fn relate_none(mut self, name: &str) -> Self {
        self.data
            .relationships
            .insert(name.to_string(), serde_json::json!({ "data": null }));
        self
    }
}

/// JSON:API error response
#[derive(Deserialize, Debug, Default)]
pub struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

/// One entry of the `errors` array
#[derive(Deserialize, Debug, Clone)]
pub struct ErrorObject {
    pub status: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
}

impl ErrorObject {
    fn message(&self) -> Option<String> {
        match (self.title.as_deref(), self.detail.as_deref()) {
            (Some(t), Some(d)) if !d.is_empty() => Some(format!("{}: {}", t, d)),
            (Some(t), _) => Some(t.to_string()),
            (None, Some(d)) => Some(d.to_string()),
            (None, None) => None,
        }
    }
}

impl ErrorDocument {
    /// Parse an error body; returns None if it is not a JSON:API error document
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<ErrorDocument>(body)
            .ok()
            .filter(|doc| !doc.errors.is_empty())
    }

    /// All error messages joined by newlines
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .filter_map(|e| e.message())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Debug, Default)]
    struct Attrs {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    }

    #[test]
    fn test_request_document_attributes_only() {
        let doc = RequestDocument::new(
            "projects",
            Attrs {
                name: "prj".to_string(),
                description: None,
            },
        );
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": {
                    "type": "projects",
                    "attributes": { "name": "prj" }
                }
            })
        );
    }

    #[test]
    fn test_request_document_relationships() {
        let doc = RequestDocument::new("workspaces", Attrs::default())
            .with_id("ws-1")
            .relate_one("project", "projects", "prj-1")
            .relate_many("tags", "tags", ["tag-1", "tag-2"])
            .relate_none("agent-pool");
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["data"]["id"], "ws-1");
        assert_eq!(
            json["data"]["relationships"]["project"]["data"]["id"],
            "prj-1"
        );
        assert_eq!(
            json["data"]["relationships"]["tags"]["data"][1]["id"],
            "tag-2"
        );
        assert!(json["data"]["relationships"]["agent-pool"]["data"].is_null());
    }

    #[test]
    fn test_relate_opt_skips_none() {
        let doc = RequestDocument::new("runs", Attrs::default()).relate_opt(
            "configuration-version",
            "configuration-versions",
            None,
        );
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["data"].get("relationships").is_none());
    }

    #[test]
    fn test_relationship_list_of() {
        let list = RelationshipList::of("workspaces", vec!["ws-1", "ws-2"]);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": [
                    { "id": "ws-1", "type": "workspaces" },
                    { "id": "ws-2", "type": "workspaces" }
                ]
            })
        );
        assert_eq!(list.ids(), vec!["ws-1", "ws-2"]);
    }

    #[test]
    fn test_relationship_data_null() {
        let rel: RelationshipData =
            serde_json::from_value(serde_json::json!({ "data": null })).unwrap();
        assert!(rel.id().is_none());
    }

    #[test]
    fn test_error_document_message() {
        let body = br#"{"errors":[{"status":"422","title":"invalid attribute","detail":"Name has already been taken"},{"status":"422","title":"second"}]}"#;
        let doc = ErrorDocument::parse(body).unwrap();
        assert_eq!(
            doc.message(),
            "invalid attribute: Name has already been taken\nsecond"
        );
    }

    #[test]
    fn test_error_document_rejects_non_jsonapi() {
        assert!(ErrorDocument::parse(b"<html>bad gateway</html>").is_none());
        assert!(ErrorDocument::parse(br#"{"errors":[]}"#).is_none());
    }

    #[test]
    fn test_document_with_included() {
        let doc: Document<Value> = serde_json::from_value(serde_json::json!({
            "data": { "id": "run-1" },
            "included": [{ "id": "ws-1", "type": "workspaces" }]
        }))
        .unwrap();
        assert_eq!(doc.data["id"], "run-1");
        assert_eq!(doc.included.len(), 1);
    }
}
