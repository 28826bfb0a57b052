//! Comment API operations

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::require_id;
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::query::{ListOptions, QueryParams};
use crate::hcp::traits::ResourceList;
use crate::hcp::TfeClient;

use super::models::{Comment, CommentCreateOptions};

/// Run comments service
pub struct Comments<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn comments(&self) -> Comments<'_> {
        Comments { client: self }
    }
}

fn run_comments_path(run_id: &str) -> Result<String> {
    require_id(run_id, ValidationError::InvalidRunId)?;
    Ok(format!("/runs/{}/comments", run_id))
}

impl Comments<'_> {
    pub async fn list(&self, run_id: &str, options: &ListOptions) -> Result<ResourceList<Comment>> {
        let mut query = QueryParams::new();
        query.list_options(options);
        self.client
            .list_page(&query.apply(&run_comments_path(run_id)?))
            .await
    }

    pub async fn read(&self, comment_id: &str) -> Result<Comment> {
        require_id(comment_id, ValidationError::InvalidCommentId)?;
        self.client
            .read_data(&format!("/comments/{}", comment_id))
            .await
    }

    pub async fn create(&self, run_id: &str, options: &CommentCreateOptions) -> Result<Comment> {
        let path = run_comments_path(run_id)?;
        options.valid()?;
        let body = RequestDocument::new("comments", options);
        self.client.create_data(&path, &body).await
    }
}
