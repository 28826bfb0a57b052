//! Comment data models

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_string;
use crate::hcp::jsonapi::RelationshipData;

/// Comment left on a run
#[derive(Deserialize, Debug, Clone)]
pub struct Comment {
    pub id: String,
    pub attributes: CommentAttributes,
    pub relationships: Option<CommentRelationships>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommentAttributes {
    pub body: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CommentRelationships {
    pub run_event: Option<RelationshipData>,
}

impl Comment {
    pub fn body(&self) -> &str {
        &self.attributes.body
    }

    pub fn run_event_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.run_event.as_ref())
            .and_then(|e| e.id())
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct CommentCreateOptions {
    pub body: String,
}

impl CommentCreateOptions {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn valid(&self) -> Result<()> {
        if !valid_string(Some(&self.body)) {
            return Err(ValidationError::RequiredBody.into());
        }
        Ok(())
    }
}
