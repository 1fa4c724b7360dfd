//! Headless LiFit client.
//!
//! Restores the saved session (or logs in with `LIFIT_USER`/`LIFIT_PASSWORD`),
//! then walks the first two pages of the home feed and logs what it sees.

use anyhow::{anyhow, Context};
use lifit::app::App;
use lifit::config::ClientConfig;
use lifit::debug;
use shared::utils::{format_count, format_handle};
use shared::FeedItem;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    debug::init();

    let config = ClientConfig::from_env().map_err(|e| anyhow!(e))?;
    config.validate().map_err(|e| anyhow!(e))?;
    info!(api_url = %config.api_url, token_file = %config.token_file.display(), "Starting LiFit client");

    let app = App::new(config).context("failed to build client")?;

    let restored = match app.restore_session().await {
        Ok(restored) => restored,
        Err(e) => {
            warn!(error = %e, "Could not read saved session");
            false
        }
    };

    if !restored {
        match (std::env::var("LIFIT_USER"), std::env::var("LIFIT_PASSWORD")) {
            (Ok(user), Ok(password)) => {
                if let Err(e) = app.login(&user, &password).await {
                    error!(error = %e, "Login failed");
                    log_events(&app);
                    return Err(anyhow!(e.user_message()));
                }
            }
            _ => warn!("No saved session and LIFIT_USER/LIFIT_PASSWORD not set; continuing anonymously"),
        }
    }

    if let Some(user) = app.current_user() {
        info!(user_id = user.id, handle = %format_handle(&user.username), "Session user");
    }

    app.feed.load().await.ok();
    app.feed.load_more().await.ok();
    log_events(&app);

    let feed = app.feed.snapshot();
    for item in &feed.items {
        log_item(item);
    }
    info!(items = feed.items.len(), has_more = feed.has_more, "Feed summary");

    Ok(())
}

fn log_events(app: &App) {
    for event in app.on_tick() {
        info!(?event, "Event");
    }
}

fn log_item(item: &FeedItem) {
    match item {
        FeedItem::Post(post) => info!(
            kind = "post",
            author = %format_handle(&post.author.username),
            title = %post.title,
            likes = %format_count(post.like_count),
            published_at = %post.published_at,
            "Feed item"
        ),
        FeedItem::Event(event) => info!(
            kind = "event",
            author = %format_handle(&event.author.username),
            title = %event.title,
            location = %event.location,
            starts_at = %event.starts_at,
            participants = %format_count(event.participant_count),
            "Feed item"
        ),
    }
}
