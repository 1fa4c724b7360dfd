//! # Goal ("meta") Endpoints

use reqwest::Method;
use shared::{CreateMetaRequest, Meta, UpdateMetaRequest};
use tracing::info;

use super::client::ApiClient;
use crate::core::error::Result;

/// Goals owned by the session user.
#[tracing::instrument(skip(client))]
pub async fn my_metas(client: &ApiClient) -> Result<Vec<Meta>> {
    client
        .send_json(client.request(Method::GET, "/meta/me"))
        .await
}

#[tracing::instrument(skip(client, request), fields(status = ?request.status))]
pub async fn update_meta(client: &ApiClient, meta_id: &str, request: &UpdateMetaRequest) -> Result<()> {
    client
        .send_empty(client.request(Method::PUT, &format!("/meta/{}", meta_id)).json(request))
        .await?;
    info!(meta_id, "Meta updated");
    Ok(())
}

#[tracing::instrument(skip(client, request), fields(due = %request.due))]
pub async fn create_meta(client: &ApiClient, request: &CreateMetaRequest) -> Result<()> {
    client
        .send_empty(client.request(Method::POST, "/meta").json(request))
        .await?;
    info!("Meta created");
    Ok(())
}
