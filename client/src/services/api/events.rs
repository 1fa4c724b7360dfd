//! # Event Endpoints

use reqwest::Method;
use shared::{CreateEventRequest, Event};
use tracing::info;

use super::client::ApiClient;
use crate::core::error::Result;

#[tracing::instrument(skip(client))]
pub async fn get_event(client: &ApiClient, event_id: i64) -> Result<Event> {
    client
        .send_json(client.request(Method::GET, &format!("/evento/{}", event_id)))
        .await
}

#[tracing::instrument(skip(client, request), fields(title = %request.title))]
pub async fn create_event(client: &ApiClient, request: &CreateEventRequest) -> Result<()> {
    client
        .send_empty(client.request(Method::POST, "/evento").json(request))
        .await?;
    info!("Event created");
    Ok(())
}

/// Confirm (`POST`) or cancel (`DELETE`) attendance.
#[tracing::instrument(skip(client))]
pub async fn set_attendance(client: &ApiClient, event_id: i64, attending: bool) -> Result<()> {
    let method = if attending { Method::POST } else { Method::DELETE };
    client
        .send_empty(client.request(method, &format!("/evento/{}/confirmar", event_id)))
        .await?;
    info!(attending, "Attendance updated");
    Ok(())
}
