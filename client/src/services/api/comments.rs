//! # Comment Endpoints

use reqwest::Method;
use shared::{Comment, CommentTarget, CreateCommentRequest};
use tracing::info;

use super::client::ApiClient;
use crate::core::error::Result;

/// All comments on a post or event, oldest first as the backend returns them.
#[tracing::instrument(skip(client))]
pub async fn list_comments(client: &ApiClient, target: CommentTarget) -> Result<Vec<Comment>> {
    client
        .send_json(client.request(Method::GET, &target.list_path()))
        .await
}

#[tracing::instrument(skip(client, request))]
pub async fn create_comment(client: &ApiClient, request: &CreateCommentRequest) -> Result<()> {
    client
        .send_empty(client.request(Method::POST, "/comentario").json(request))
        .await?;
    info!(post_id = ?request.post_id, event_id = ?request.event_id, "Comment sent");
    Ok(())
}
