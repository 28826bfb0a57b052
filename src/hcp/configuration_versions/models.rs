//! Configuration version data models

use serde::{Deserialize, Serialize};

use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// Configuration version data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct ConfigurationVersion {
    pub id: String,
    pub attributes: ConfigurationVersionAttributes,
    pub links: Option<ConfigurationVersionLinks>,
}

/// Configuration version attributes
#[derive(Deserialize, Debug, Clone)]
pub struct ConfigurationVersionAttributes {
    /// Source of the configuration (e.g., "tfe-api", "gitlab", "github")
    pub source: Option<String>,
    /// Status: pending, fetching, uploaded, archived, errored
    pub status: String,
    #[serde(rename = "auto-queue-runs", default)]
    pub auto_queue_runs: bool,
    #[serde(default)]
    pub speculative: bool,
    #[serde(default)]
    pub provisional: bool,
    pub error: Option<String>,
    #[serde(rename = "error-message")]
    pub error_message: Option<String>,
    /// One-time upload target, only present while the version is pending
    #[serde(rename = "upload-url")]
    pub upload_url: Option<String>,
    #[serde(rename = "status-timestamps")]
    pub status_timestamps: Option<serde_json::Value>,
}

/// Configuration version links
#[derive(Deserialize, Debug, Clone)]
pub struct ConfigurationVersionLinks {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    /// Download link for configuration files
    pub download: Option<String>,
}

impl TfeResource for ConfigurationVersion {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        // Configuration versions don't have names, use ID
        &self.id
    }
}

impl ConfigurationVersion {
    pub fn status(&self) -> &str {
        &self.attributes.status
    }

    /// Check if configuration version is downloadable
    pub fn is_downloadable(&self) -> bool {
        self.attributes.status == "uploaded"
    }

    pub fn is_errored(&self) -> bool {
        self.attributes.status == "errored"
    }

    /// Get download path if available
    pub fn download_path(&self) -> Option<&str> {
        self.links.as_ref().and_then(|l| l.download.as_deref())
    }

    pub fn upload_url(&self) -> Option<&str> {
        self.attributes.upload_url.as_deref()
    }

    /// Get source description
    pub fn source(&self) -> &str {
        self.attributes.source.as_deref().unwrap_or("unknown")
    }
}

/// Options for listing configuration versions
#[derive(Debug, Clone, Default)]
pub struct ConfigurationVersionListOptions {
    pub list: ListOptions,
    /// "ingress_attributes" and/or "run"
    pub include: Vec<String>,
}

/// Options for creating a configuration version
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigurationVersionCreateOptions {
    /// Queue a run once the upload completes (server default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_queue_runs: Option<bool>,
    /// Plan-only configuration that can never be applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speculative: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisional: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_cv(status: &str, download: Option<&str>) -> ConfigurationVersion {
        serde_json::from_value(serde_json::json!({
            "id": "cv-abc123",
            "type": "configuration-versions",
            "attributes": {"source": "tfe-api", "status": status},
            "links": {
                "self": "/api/v2/configuration-versions/cv-abc123",
                "download": download
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_is_downloadable() {
        assert!(create_test_cv("uploaded", None).is_downloadable());
        assert!(!create_test_cv("pending", None).is_downloadable());
        assert!(!create_test_cv("archived", None).is_downloadable());
        assert!(create_test_cv("errored", None).is_errored());
    }

    #[test]
    fn test_download_path() {
        let cv = create_test_cv(
            "uploaded",
            Some("/api/v2/configuration-versions/cv-abc123/download"),
        );
        assert_eq!(
            cv.download_path(),
            Some("/api/v2/configuration-versions/cv-abc123/download")
        );
        assert_eq!(create_test_cv("pending", None).download_path(), None);
    }

    #[test]
    fn test_tfe_resource_trait() {
        let cv = create_test_cv("uploaded", None);
        assert_eq!(cv.id(), "cv-abc123");
        assert_eq!(cv.name(), "cv-abc123");
        assert_eq!(cv.source(), "tfe-api");
    }

    #[test]
    fn test_pending_version_has_upload_url() {
        let cv: ConfigurationVersion = serde_json::from_value(serde_json::json!({
            "id": "cv-new",
            "type": "configuration-versions",
            "attributes": {
                "status": "pending",
                "auto-queue-runs": true,
                "upload-url": "https://archivist.terraform.io/v1/object/abc"
            }
        }))
        .unwrap();
        assert!(cv.attributes.auto_queue_runs);
        assert_eq!(
            cv.upload_url(),
            Some("https://archivist.terraform.io/v1/object/abc")
        );
        assert!(cv.links.is_none());
    }

    #[test]
    fn test_create_options_serialization() {
        let opts = ConfigurationVersionCreateOptions {
            auto_queue_runs: Some(false),
            speculative: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            serde_json::json!({"auto-queue-runs": false, "speculative": true})
        );
    }
}
