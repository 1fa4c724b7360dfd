//! # Post and Like Endpoints

use reqwest::Method;
use shared::{CreatePostRequest, LikeTarget};
use tracing::info;

use super::client::ApiClient;
use crate::core::error::Result;

#[tracing::instrument(skip(client, request), fields(title = %request.title))]
pub async fn create_post(client: &ApiClient, request: &CreatePostRequest) -> Result<()> {
    client
        .send_empty(client.request(Method::POST, "/postagem").json(request))
        .await?;
    info!("Post created");
    Ok(())
}

/// Like (`POST`) or unlike (`DELETE`) a post or event.
#[tracing::instrument(skip(client))]
pub async fn set_like(client: &ApiClient, target: LikeTarget, liked: bool) -> Result<()> {
    let method = if liked { Method::POST } else { Method::DELETE };
    client
        .send_empty(client.request(method, &target.path()))
        .await
}
