//! State version data models

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::jsonapi::{RelationshipData, RelationshipList};
use crate::hcp::query::ListOptions;
use crate::hcp::traits::TfeResource;

/// State version data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct StateVersion {
    pub id: String,
    pub attributes: StateVersionAttributes,
    pub relationships: Option<StateVersionRelationships>,
}

/// State version attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct StateVersionAttributes {
    pub serial: u64,
    pub terraform_version: Option<String>,
    pub hosted_state_download_url: Option<String>,
    pub hosted_json_state_download_url: Option<String>,
    /// Outputs and resources are extracted asynchronously after upload
    pub resources_processed: Option<bool>,
    pub lineage: Option<String>,
    /// pending, finalized or discarded
    pub status: Option<String>,
    pub size: Option<u64>,
    pub vcs_commit_sha: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resources: Vec<StateVersionResource>,
}

/// Resource summary extracted from a processed state
#[derive(Deserialize, Debug, Clone)]
pub struct StateVersionResource {
    pub name: String,
    #[serde(default)]
    pub count: u32,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub module: Option<String>,
    pub provider: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StateVersionRelationships {
    pub run: Option<RelationshipData>,
    pub workspace: Option<RelationshipData>,
    pub outputs: Option<RelationshipList>,
}

impl TfeResource for StateVersion {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }
}

impl StateVersion {
    pub fn serial(&self) -> u64 {
        self.attributes.serial
    }

    pub fn download_url(&self) -> Option<&str> {
        self.attributes.hosted_state_download_url.as_deref()
    }

    pub fn resources_processed(&self) -> bool {
        self.attributes.resources_processed.unwrap_or(false)
    }

    pub fn output_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.outputs.as_ref())
            .map(|o| o.ids())
            .unwrap_or_default()
    }
}

/// Output of a state version
#[derive(Deserialize, Debug, Clone)]
pub struct StateVersionOutput {
    pub id: String,
    pub attributes: StateVersionOutputAttributes,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct StateVersionOutputAttributes {
    pub name: String,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(rename = "type")]
    pub output_type: Option<String>,
    /// Null for sensitive outputs unless read individually
    #[serde(default)]
    pub value: serde_json::Value,
    pub detailed_type: Option<serde_json::Value>,
}

impl TfeResource for StateVersionOutput {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Query options for listing state versions
///
/// Both filters are required by the API.
#[derive(Debug, Clone, Default)]
pub struct StateVersionListOptions {
    pub list: ListOptions,
    pub organization: String,
    pub workspace: String,
}

impl StateVersionListOptions {
    pub fn new(organization: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            workspace: workspace.into(),
            ..Default::default()
        }
    }
}

/// Options for creating a state version
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct StateVersionCreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<u64>,
    /// Hex MD5 of the raw state
    pub md5: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineage: Option<String>,
    /// Base64 of the raw state
    pub state: String,
    /// Skip the lineage/serial checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_state_outputs: Option<String>,
    #[serde(skip)]
    pub run_id: Option<String>,
}

impl StateVersionCreateOptions {
    /// Build options from a raw state file, computing its MD5 and base64 forms
    pub fn from_raw_state(serial: u64, lineage: Option<&str>, raw_state: &[u8]) -> Self {
        let mut hasher = Md5::new();
        hasher.update(raw_state);
        Self {
            serial: Some(serial),
            md5: hasher
                .finalize()
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect(),
            lineage: lineage.map(str::to_string),
            state: BASE64.encode(raw_state),
            ..Default::default()
        }
    }

    pub fn valid(&self) -> Result<()> {
        if self.serial.is_none() {
            return Err(ValidationError::RequiredSerial.into());
        }
        if self.md5.is_empty() {
            return Err(ValidationError::RequiredMd5.into());
        }
        if self.state.is_empty() {
            return Err(ValidationError::RequiredState.into());
        }
        Ok(())
    }
}

/// Downloaded Terraform state file structure
#[derive(Deserialize, Debug)]
pub struct TerraformState {
    pub version: u32,
    pub terraform_version: String,
    pub serial: u64,
    pub lineage: String,
    #[serde(default)]
    pub outputs: serde_json::Value,
    #[serde(default)]
    pub resources: Vec<serde_json::Value>,
}

/// State with no resources that succeeds a given state
#[derive(Serialize, Debug)]
pub struct EmptyTerraformState {
    pub version: u32,
    pub terraform_version: String,
    pub serial: u64,
    pub lineage: String,
    pub outputs: serde_json::Value,
    pub resources: Vec<serde_json::Value>,
}

impl EmptyTerraformState {
    pub fn from_current(state: &TerraformState) -> Self {
        Self {
            version: 4, // Terraform state format version
            terraform_version: state.terraform_version.clone(),
            serial: state.serial + 1,
            lineage: state.lineage.clone(),
            outputs: serde_json::json!({}),
            resources: vec![],
        }
    }

    pub fn to_create_options(&self) -> Result<StateVersionCreateOptions> {
        let raw = serde_json::to_vec(self)?;
        Ok(StateVersionCreateOptions::from_raw_state(
            self.serial,
            Some(&self.lineage),
            &raw,
        ))
    }
}
