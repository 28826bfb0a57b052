//! Notification configuration API operations

use crate::config::api;
use crate::error::{Result, ValidationError};
use crate::hcp::helpers::require_id;
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{
    NotificationConfiguration, NotificationConfigurationCreateOptions,
    NotificationConfigurationUpdateOptions,
};

/// Notification configurations service
pub struct NotificationConfigurations<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn notification_configurations(&self) -> NotificationConfigurations<'_> {
        NotificationConfigurations { client: self }
    }
}

fn workspace_configs_path(workspace_id: &str) -> Result<String> {
    require_id(workspace_id, ValidationError::InvalidWorkspaceId)?;
    Ok(format!(
        "/{}/{}/notification-configurations",
        api::WORKSPACES,
        workspace_id
    ))
}

fn config_path(config_id: &str) -> Result<String> {
    require_id(config_id, ValidationError::InvalidNotificationConfigId)?;
    Ok(format!("/notification-configurations/{}", config_id))
}

impl NotificationConfigurations<'_> {
    pub async fn list(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> Result<ResourceList<NotificationConfiguration>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        self.client
            .list_page(&query.apply(&workspace_configs_path(workspace_id)?))
            .await
    }

    pub async fn read(&self, config_id: &str) -> Result<NotificationConfiguration> {
        self.client.read_data(&config_path(config_id)?).await
    }

    pub async fn create(
        &self,
        workspace_id: &str,
        options: &NotificationConfigurationCreateOptions,
    ) -> Result<NotificationConfiguration> {
        let path = workspace_configs_path(workspace_id)?;
        options.valid()?;
        let mut body = RequestDocument::new("notification-configurations", options);
        if !options.email_user_ids.is_empty() {
            body = body.relate_many("users", "users", &options.email_user_ids);
        }
        self.client.create_data(&path, &body).await
    }

    pub async fn update(
        &self,
        config_id: &str,
        options: &NotificationConfigurationUpdateOptions,
    ) -> Result<NotificationConfiguration> {
        let path = config_path(config_id)?;
        options.valid()?;
        let mut body =
            RequestDocument::new("notification-configurations", options).with_id(config_id);
        if let Some(users) = &options.email_user_ids {
            body = body.relate_many("users", "users", users);
        }
        self.client.update_data(&path, &body).await
    }

    pub async fn delete(&self, config_id: &str) -> Result<()> {
        self.client.delete_path(&config_path(config_id)?).await
    }

    /// Send a test notification; the delivery response is recorded on the result
    pub async fn verify(&self, config_id: &str) -> Result<NotificationConfiguration> {
        let path = format!("{}/actions/verify", config_path(config_id)?);
        self.client.post_for_data(&path).await
    }
}
