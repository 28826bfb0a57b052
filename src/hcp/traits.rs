//! Common traits for TFE resources

use crate::hcp::{Pagination, PaginationMeta};
use serde::Deserialize;

/// Common trait for named TFE resources (organizations, projects, workspaces, ...)
pub trait TfeResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;

    /// Check if the resource matches by name or ID
    ///
    /// Default implementation checks for exact match on either field.
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.name() == input
    }
}

/// Trait for API responses that contain paginated data
///
/// Implement this trait for any list response to enable use with
/// `TfeClient::fetch_all_pages()`.
pub trait PaginatedResponse<T> {
    /// Consume self and return the data items
    fn into_data(self) -> Vec<T>;
    /// Get reference to pagination metadata
    fn meta(&self) -> Option<&PaginationMeta>;
}

/// Generic API list response wrapper for paginated endpoints
#[derive(Deserialize, Debug)]
pub struct ApiListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub included: Vec<serde_json::Value>,
    #[serde(default)]
    pub meta: Option<PaginationMeta>,
}

impl<T> PaginatedResponse<T> for ApiListResponse<T> {
    fn into_data(self) -> Vec<T> {
        self.data
    }

    fn meta(&self) -> Option<&PaginationMeta> {
        self.meta.as_ref()
    }
}

/// One page of a list operation
#[derive(Debug, Clone)]
pub struct ResourceList<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> ResourceList<T> {
    /// True if the server reported a following page
    pub fn has_next_page(&self) -> bool {
        self.pagination
            .as_ref()
            .and_then(|p| p.next_page)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> From<ApiListResponse<T>> for ResourceList<T> {
    fn from(resp: ApiListResponse<T>) -> Self {
        Self {
            pagination: resp.meta.and_then(|m| m.pagination),
            items: resp.data,
        }
    }
}

impl<T> IntoIterator for ResourceList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        id: String,
        name: String,
    }

    impl TfeResource for TestResource {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_matches_by_id_or_name() {
        let resource = TestResource {
            id: "res-123".to_string(),
            name: "my-resource".to_string(),
        };
        assert!(resource.matches("res-123"));
        assert!(resource.matches("my-resource"));
        assert!(!resource.matches("other"));
    }

    #[test]
    fn test_api_list_response_meta() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [{"id": "item-1"}],
                "meta": {
                    "pagination": {
                        "current-page": 1,
                        "prev-page": null,
                        "next-page": 2,
                        "total-pages": 3,
                        "total-count": 5
                    }
                }
            }))
            .unwrap();
        let meta = response.meta().unwrap();
        let pagination = meta.pagination.as_ref().unwrap();
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.total_count, 5);
        assert_eq!(pagination.next_page, Some(2));
    }

    #[test]
    fn test_api_list_response_without_meta() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [{"id": "item-1"}]
            }))
            .unwrap();
        assert!(response.meta().is_none());
        assert_eq!(response.into_data().len(), 1);
    }

    #[test]
    fn test_resource_list_from_response() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [{"id": "a"}, {"id": "b"}],
                "meta": {
                    "pagination": {
                        "current-page": 1,
                        "next-page": 2,
                        "total-pages": 2,
                        "total-count": 4
                    }
                }
            }))
            .unwrap();
        let list: ResourceList<serde_json::Value> = response.into();
        assert_eq!(list.len(), 2);
        assert!(list.has_next_page());
        let ids: Vec<String> = list
            .into_iter()
            .map(|v| v["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_resource_list_last_page() {
        let list: ResourceList<u32> = ResourceList {
            items: vec![],
            pagination: None,
        };
        assert!(list.is_empty());
        assert!(!list.has_next_page());
    }
}
