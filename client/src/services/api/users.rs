//! # User Endpoints
//!
//! Profiles, search and follow relations.

use reqwest::Method;
use shared::{FollowCounters, UpdateProfileRequest, User, UserSummary};
use tracing::info;

use super::client::ApiClient;
use crate::core::error::Result;

/// `GET /usuario/me`
#[tracing::instrument(skip(client))]
pub async fn current_user(client: &ApiClient) -> Result<User> {
    client
        .send_json(client.request(Method::GET, "/usuario/me"))
        .await
}

/// `PUT /usuario/me`, returning the stored profile.
#[tracing::instrument(skip(client, request), fields(username = %request.username))]
pub async fn update_profile(client: &ApiClient, request: &UpdateProfileRequest) -> Result<User> {
    let user: User = client
        .send_json(client.request(Method::PUT, "/usuario/me").json(request))
        .await?;
    info!(user_id = user.id, "Profile updated");
    Ok(user)
}

#[tracing::instrument(skip(client))]
pub async fn get_user(client: &ApiClient, user_id: i64) -> Result<User> {
    client
        .send_json(client.request(Method::GET, &format!("/usuario/{}", user_id)))
        .await
}

/// Search users by name or username.
#[tracing::instrument(skip(client))]
pub async fn search_users(client: &ApiClient, query: &str) -> Result<Vec<UserSummary>> {
    let results: Vec<UserSummary> = client
        .send_json(
            client
                .request(Method::GET, "/usuario/buscar")
                .query(&[("query", query)]),
        )
        .await?;
    info!(count = results.len(), "User search completed");
    Ok(results)
}

#[tracing::instrument(skip(client))]
pub async fn follow_counters(client: &ApiClient, user_id: i64) -> Result<FollowCounters> {
    client
        .send_json(client.request(Method::GET, &format!("/seguidor/conta/{}", user_id)))
        .await
}

/// Follow (`POST`) or unfollow (`DELETE`) a user.
#[tracing::instrument(skip(client))]
pub async fn set_following(client: &ApiClient, user_id: i64, follow: bool) -> Result<()> {
    let method = if follow { Method::POST } else { Method::DELETE };
    client
        .send_empty(client.request(method, &format!("/seguidor/{}", user_id)))
        .await
}
