//! # Unified Feed
//!
//! `GET /feed/unificado` returns posts and events interleaved. On the wire an
//! item is `{ "tipo": "POSTAGEM" | "EVENTO", "postagem": {..} | null,
//! "evento": {..} | null }`. Here it is the sum type [`FeedItem`]; decoding
//! fails when the populated payload does not match the tag, so a held
//! `FeedItem` always has exactly one payload.
//!
//! A page is decoded entry by entry with [`FeedPage::decode`]: a bad entry is
//! dropped and the rest of the page survives.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::Event;
use super::user::Author;

/// Feed item tag (`tipo`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedKind {
    #[serde(rename = "POSTAGEM")]
    Post,
    #[serde(rename = "EVENTO")]
    Event,
}

/// Post as embedded in the feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "autor")]
    pub author: Author,
    #[serde(rename = "midia", default)]
    pub media_url: String,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    /// Publication timestamp, also the pagination cursor. Kept verbatim.
    #[serde(rename = "dataPublicacao")]
    pub published_at: String,
    #[serde(rename = "numCurtidas", default)]
    pub like_count: u32,
    // The backend has shipped this field misspelled
    #[serde(rename = "numComentarios", alias = "numComentaios", default)]
    pub comment_count: u32,
    #[serde(rename = "numCompartilhamentos", default)]
    pub share_count: u32,
    #[serde(rename = "usuarioCurtiu", default)]
    pub liked: bool,
}

impl FeedPost {
    /// Text shown under the media: description, falling back to the title
    pub fn caption(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => &self.title,
        }
    }
}

/// One entry of the unified feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeedItem", into = "RawFeedItem")]
pub enum FeedItem {
    Post(FeedPost),
    Event(Event),
}

impl FeedItem {
    pub fn kind(&self) -> FeedKind {
        match self {
            FeedItem::Post(_) => FeedKind::Post,
            FeedItem::Event(_) => FeedKind::Event,
        }
    }

    /// Pagination cursor carried by this item. Only posts are cursor sources.
    pub fn cursor(&self) -> Option<&str> {
        match self {
            FeedItem::Post(post) if !post.published_at.is_empty() => Some(&post.published_at),
            _ => None,
        }
    }

    pub fn as_event_mut(&mut self) -> Option<&mut Event> {
        match self {
            FeedItem::Event(event) => Some(event),
            FeedItem::Post(_) => None,
        }
    }

    pub fn as_post_mut(&mut self) -> Option<&mut FeedPost> {
        match self {
            FeedItem::Post(post) => Some(post),
            FeedItem::Event(_) => None,
        }
    }
}

/// Cursor of the most recent post in `items`, scanning from the end.
///
/// Events are skipped. `None` when the list holds no post.
pub fn last_post_cursor(items: &[FeedItem]) -> Option<&str> {
    items.iter().rev().find_map(FeedItem::cursor)
}

/// One page of the unified feed after per-entry decoding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    /// Entries the backend sent, dropped ones included. Paging keys off this.
    pub received: usize,
}

/// Entry dropped by [`FeedPage::decode`]
#[derive(Debug)]
pub struct SkippedFeedItem {
    /// Position in the page as sent
    pub index: usize,
    pub error: serde_json::Error,
}

impl FeedPage {
    /// Page built from already-valid items
    pub fn from_items(items: Vec<FeedItem>) -> Self {
        Self { received: items.len(), items }
    }

    /// Decode every entry on its own, keeping the valid ones in order.
    pub fn decode(entries: Vec<serde_json::Value>) -> (Self, Vec<SkippedFeedItem>) {
        let received = entries.len();
        let mut items = Vec::with_capacity(received);
        let mut skipped = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<FeedItem>(entry) {
                Ok(item) => items.push(item),
                Err(error) => skipped.push(SkippedFeedItem { index, error }),
            }
        }
        (Self { items, received }, skipped)
    }
}

/// Wire representation of [`FeedItem`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeedItem {
    #[serde(rename = "tipo")]
    pub kind: FeedKind,
    #[serde(rename = "postagem", default)]
    pub post: Option<FeedPost>,
    #[serde(rename = "evento", default)]
    pub event: Option<Event>,
}

/// Rejected feed item: the tag and the populated payload disagree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItemError {
    pub kind: FeedKind,
    pub has_post: bool,
    pub has_event: bool,
}

impl fmt::Display for FeedItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "feed item tagged {:?} must carry exactly that payload (postagem: {}, evento: {})",
            self.kind, self.has_post, self.has_event
        )
    }
}

impl std::error::Error for FeedItemError {}

impl TryFrom<RawFeedItem> for FeedItem {
    type Error = FeedItemError;

    fn try_from(raw: RawFeedItem) -> Result<Self, Self::Error> {
        let error = FeedItemError {
            kind: raw.kind,
            has_post: raw.post.is_some(),
            has_event: raw.event.is_some(),
        };
        match (raw.kind, raw.post, raw.event) {
            (FeedKind::Post, Some(post), None) => Ok(FeedItem::Post(post)),
            (FeedKind::Event, None, Some(event)) => Ok(FeedItem::Event(event)),
            _ => Err(error),
        }
    }
}

impl From<FeedItem> for RawFeedItem {
    fn from(item: FeedItem) -> Self {
        match item {
            FeedItem::Post(post) => RawFeedItem {
                kind: FeedKind::Post,
                post: Some(post),
                event: None,
            },
            FeedItem::Event(event) => RawFeedItem {
                kind: FeedKind::Event,
                post: None,
                event: Some(event),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = r#"{
        "autor": {"nome": "Ana", "nomeUsuario": "ana", "fotoPerfil": null},
        "midia": "https://img/p.jpg",
        "titulo": "Treino de perna",
        "dataPublicacao": "2025-03-02T10:00:00",
        "numCurtidas": 3,
        "numComentaios": 2,
        "numCompartilhamentos": 0
    }"#;

    const EVENT: &str = r#"{
        "id": 9,
        "titulo": "Corrida",
        "descricao": "5km",
        "localizacao": "Parque",
        "dataInicio": "2025-03-05T07:00:00",
        "dataFim": "2025-03-05T08:00:00",
        "autor": {"nome": "Bia", "nomeUsuario": "bia", "fotoPerfil": null},
        "midia": "https://img/e.jpg",
        "numCurtidas": 0,
        "numComentarios": 0,
        "numCompartilhamentos": 0,
        "numParticipantes": 1,
        "participantes": [],
        "usuarioConfirmado": true
    }"#;

    fn decode(json: &str) -> Result<FeedItem, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_decodes_post_item_with_misspelled_comment_count() {
        let item = decode(&format!(r#"{{"tipo":"POSTAGEM","postagem":{POST},"evento":null}}"#)).unwrap();
        assert_eq!(item.kind(), FeedKind::Post);
        match item {
            FeedItem::Post(post) => {
                assert_eq!(post.comment_count, 2);
                assert_eq!(post.caption(), "Treino de perna");
            }
            FeedItem::Event(_) => panic!("expected post"),
        }
    }

    #[test]
    fn test_decodes_event_item() {
        let item = decode(&format!(r#"{{"tipo":"EVENTO","postagem":null,"evento":{EVENT}}}"#)).unwrap();
        assert_eq!(item.kind(), FeedKind::Event);
        assert_eq!(item.cursor(), None);
    }

    #[test]
    fn test_rejects_tag_payload_mismatch() {
        assert!(decode(r#"{"tipo":"POSTAGEM","postagem":null,"evento":null}"#).is_err());
        assert!(decode(&format!(r#"{{"tipo":"EVENTO","postagem":{POST},"evento":null}}"#)).is_err());
        assert!(decode(&format!(
            r#"{{"tipo":"POSTAGEM","postagem":{POST},"evento":{EVENT}}}"#
        ))
        .is_err());
    }

    #[test]
    fn test_last_post_cursor_skips_trailing_events() {
        let post = decode(&format!(r#"{{"tipo":"POSTAGEM","postagem":{POST}}}"#)).unwrap();
        let event = decode(&format!(r#"{{"tipo":"EVENTO","evento":{EVENT}}}"#)).unwrap();

        let items = vec![post.clone(), event.clone(), event.clone()];
        assert_eq!(last_post_cursor(&items), Some("2025-03-02T10:00:00"));
        assert_eq!(last_post_cursor(&[event]), None);
        assert_eq!(last_post_cursor(&[]), None);
    }

    #[test]
    fn test_page_decode_drops_only_bad_entries() {
        let entries: Vec<serde_json::Value> = serde_json::from_str(&format!(
            r#"[
                {{"tipo":"POSTAGEM","postagem":{POST},"evento":null}},
                {{"tipo":"EVENTO","postagem":null,"evento":null}},
                {{"tipo":"EVENTO","postagem":null,"evento":{EVENT}}},
                {{"tipo":"PROPAGANDA"}}
            ]"#
        ))
        .unwrap();

        let (page, skipped) = FeedPage::decode(entries);

        assert_eq!(page.received, 4);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].kind(), FeedKind::Post);
        assert_eq!(page.items[1].kind(), FeedKind::Event);
        assert_eq!(skipped.iter().map(|s| s.index).collect::<Vec<_>>(), vec![1, 3]);
        assert!(skipped[0].error.to_string().contains("must carry exactly that payload"));
    }

    #[test]
    fn test_serializes_back_to_tagged_shape() {
        let item = decode(&format!(r#"{{"tipo":"EVENTO","evento":{EVENT}}}"#)).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["tipo"], "EVENTO");
        assert!(json["postagem"].is_null());
        assert_eq!(json["evento"]["id"], 9);
    }
}
