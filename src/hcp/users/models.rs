//! User data models

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::{valid_email, valid_string_id};
use crate::hcp::traits::TfeResource;

/// User data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub attributes: UserAttributes,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UserAttributes {
    #[serde(default)]
    pub username: String,
    pub email: Option<String>,
    #[serde(rename = "avatar-url")]
    pub avatar_url: Option<String>,
    #[serde(rename = "is-service-account")]
    pub is_service_account: Option<bool>,
    #[serde(rename = "is-site-admin")]
    pub is_site_admin: Option<bool>,
    #[serde(rename = "unconfirmed-email")]
    pub unconfirmed_email: Option<String>,
    #[serde(rename = "two-factor")]
    pub two_factor: Option<TwoFactor>,
    #[serde(rename = "v2-only")]
    pub v2_only: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TwoFactor {
    pub enabled: bool,
    pub verified: bool,
}

impl TfeResource for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.username
    }
}

/// Options for updating the current user
#[derive(Serialize, Debug, Clone, Default)]
pub struct UserUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserUpdateOptions {
    pub fn valid(&self) -> Result<()> {
        if let Some(username) = &self.username {
            if !valid_string_id(Some(username)) {
                return Err(ValidationError::InvalidName.into());
            }
        }
        if let Some(email) = &self.email {
            if !valid_email(email) {
                return Err(ValidationError::InvalidEmail.into());
            }
        }
        Ok(())
    }
}
