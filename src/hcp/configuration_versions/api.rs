//! Configuration version API operations

use bytes::Bytes;
use log::debug;
use reqwest::Method;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::api;
use crate::error::{Result, TfeError, ValidationError};
use crate::hcp::helpers::{poll_until, require_id};
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{
    ConfigurationVersion, ConfigurationVersionCreateOptions, ConfigurationVersionListOptions,
};

/// Configuration versions service
pub struct ConfigurationVersions<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn configuration_versions(&self) -> ConfigurationVersions<'_> {
        ConfigurationVersions { client: self }
    }
}

fn workspace_cvs_path(workspace_id: &str) -> Result<String> {
    require_id(workspace_id, ValidationError::InvalidWorkspaceId)?;
    Ok(format!(
        "/{}/{}/configuration-versions",
        api::WORKSPACES,
        workspace_id
    ))
}

fn cv_path(cv_id: &str) -> Result<String> {
    require_id(cv_id, ValidationError::InvalidConfigVersionId)?;
    Ok(format!("/configuration-versions/{}", cv_id))
}

impl ConfigurationVersions<'_> {
    /// List configuration versions of a workspace, newest first
    pub async fn list(
        &self,
        workspace_id: &str,
        options: &ConfigurationVersionListOptions,
    ) -> Result<ResourceList<ConfigurationVersion>> {
        let mut query = QueryParams::new();
        query.list_options(&options.list).include(&options.include);
        self.client
            .list_page(&query.apply(&workspace_cvs_path(workspace_id)?))
            .await
    }

    pub async fn read(&self, cv_id: &str) -> Result<ConfigurationVersion> {
        self.client.read_data(&cv_path(cv_id)?).await
    }

    /// Create a pending configuration version; upload its content next
    pub async fn create(
        &self,
        workspace_id: &str,
        options: &ConfigurationVersionCreateOptions,
    ) -> Result<ConfigurationVersion> {
        let path = workspace_cvs_path(workspace_id)?;
        debug!("Creating configuration version in {}", workspace_id);
        let body = RequestDocument::new("configuration-versions", options);
        self.client.create_data(&path, &body).await
    }

    /// Upload a gzipped tarball of the configuration to the version's upload URL
    pub async fn upload(&self, upload_url: &str, tarball: Bytes) -> Result<()> {
        if upload_url.is_empty() {
            return Err(ValidationError::RequiredUrl.into());
        }
        self.client.upload_bytes(upload_url, tarball).await
    }

    /// Upload a `.tar.gz` file from disk
    pub async fn upload_file(&self, upload_url: &str, tarball: &Path) -> Result<()> {
        let data = tokio::fs::read(tarball).await.map_err(|e| {
            TfeError::Io(format!("Failed to read '{}': {}", tarball.display(), e))
        })?;
        self.upload(upload_url, Bytes::from(data)).await
    }

    /// Download the configuration files as tar.gz
    ///
    /// The endpoint redirects to the archive; the redirect is followed.
    pub async fn download(&self, cv_id: &str) -> Result<Bytes> {
        let path = format!("{}/download", cv_path(cv_id)?);
        debug!("Downloading configuration from: {}", path);
        let response = self.client.execute(Method::GET, &path, None).await?;
        if response.status().as_u16() == 204 {
            return Err(TfeError::Unavailable(format!(
                "Configuration version '{}' has no downloadable content (empty or not uploaded)",
                cv_id
            )));
        }
        Ok(response.bytes().await?)
    }

    /// Download the configuration into `output_path`, returning the byte count
    pub async fn download_to_file(&self, cv_id: &str, output_path: &Path) -> Result<u64> {
        let bytes = self.download(cv_id).await?;
        let size = bytes.len() as u64;

        let mut file = File::create(output_path).await.map_err(|e| {
            TfeError::Io(format!(
                "Failed to create file '{}': {}",
                output_path.display(),
                e
            ))
        })?;
        file.write_all(&bytes).await.map_err(|e| {
            TfeError::Io(format!(
                "Failed to write to '{}': {}",
                output_path.display(),
                e
            ))
        })?;
        file.flush().await?;

        debug!("Downloaded {} bytes to {}", size, output_path.display());
        Ok(size)
    }

    /// Remove the uploaded files of a version no longer in use
    pub async fn archive(&self, cv_id: &str) -> Result<()> {
        let path = format!("{}/actions/archive", cv_path(cv_id)?);
        self.client.post_empty(&path).await
    }

    /// Poll until the version reaches `uploaded`
    ///
    /// An `errored` version ends the wait with its error message.
    pub async fn wait_until_uploaded(
        &self,
        cv_id: &str,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<ConfigurationVersion> {
        require_id(cv_id, ValidationError::InvalidConfigVersionId)?;
        let what = format!("configuration version {} upload", cv_id);
        poll_until(&what, interval, max_attempts, move || async move {
            let cv = self.read(cv_id).await?;
            if cv.is_errored() {
                return Err(TfeError::Unavailable(format!(
                    "Configuration version '{}' errored: {}",
                    cv_id,
                    cv.attributes
                        .error_message
                        .as_deref()
                        .unwrap_or("unknown error")
                )));
            }
            Ok(cv.is_downloadable().then_some(cv))
        })
        .await
    }

    /// Most recent configuration version with status "uploaded"
    pub async fn latest_downloadable(
        &self,
        workspace_id: &str,
    ) -> Result<Option<ConfigurationVersion>> {
        let options = ConfigurationVersionListOptions {
            list: ListOptions::page(1, api::MAX_PAGE_SIZE),
            ..Default::default()
        };
        let cvs = self.list(workspace_id, &options).await?;
        Ok(cvs.into_iter().find(|cv| cv.is_downloadable()))
    }
}
