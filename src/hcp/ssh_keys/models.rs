//! SSH key data models

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_string;
use crate::hcp::traits::TfeResource;

/// SSH key stored in an organization; the private key is write-only
#[derive(Deserialize, Debug, Clone)]
pub struct SshKey {
    pub id: String,
    pub attributes: SshKeyAttributes,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SshKeyAttributes {
    pub name: String,
}

impl TfeResource for SshKey {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct SshKeyCreateOptions {
    pub name: String,
    /// PEM-encoded private key
    pub value: String,
}

impl SshKeyCreateOptions {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn valid(&self) -> Result<()> {
        if !valid_string(Some(&self.name)) {
            return Err(ValidationError::RequiredName.into());
        }
        if !valid_string(Some(&self.value)) {
            return Err(ValidationError::RequiredValue.into());
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct SshKeyUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
