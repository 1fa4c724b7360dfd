//! # Comment Data Transfer Objects

use serde::{Deserialize, Serialize};

/// Parent of a comment. A comment belongs to exactly one post or one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentTarget {
    Post(i64),
    Event(i64),
}

impl CommentTarget {
    /// Listing path for this parent
    pub fn list_path(&self) -> String {
        match self {
            CommentTarget::Post(id) => format!("/comentario/postagem/{id}"),
            CommentTarget::Event(id) => format!("/comentario/evento/{id}"),
        }
    }
}

/// Comment as listed by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "conteudo")]
    pub content: String,
    #[serde(rename = "autorId")]
    pub author_id: i64,
    #[serde(rename = "autorNomeUsuario", default)]
    pub author_username: String,
    #[serde(rename = "dataCriacao", default)]
    pub created_at: String,
    #[serde(rename = "postagemId", default)]
    pub post_id: Option<i64>,
    #[serde(rename = "eventoId", default)]
    pub event_id: Option<i64>,
}

/// Comment creation (`POST /comentario`)
///
/// Exactly one of `postagemId`/`eventoId` is non-null; build it with [`CreateCommentRequest::new`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateCommentRequest {
    #[serde(rename = "conteudo")]
    pub content: String,
    #[serde(rename = "postagemId")]
    pub post_id: Option<i64>,
    #[serde(rename = "eventoId")]
    pub event_id: Option<i64>,
}

impl CreateCommentRequest {
    pub fn new(target: CommentTarget, content: impl Into<String>) -> Self {
        let (post_id, event_id) = match target {
            CommentTarget::Post(id) => (Some(id), None),
            CommentTarget::Event(id) => (None, Some(id)),
        };
        Self {
            content: content.into(),
            post_id,
            event_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path_per_target() {
        assert_eq!(CommentTarget::Post(4).list_path(), "/comentario/postagem/4");
        assert_eq!(CommentTarget::Event(8).list_path(), "/comentario/evento/8");
    }

    #[test]
    fn test_create_request_sets_exactly_one_parent() {
        let json = serde_json::to_value(CreateCommentRequest::new(CommentTarget::Event(8), "bora")).unwrap();
        assert!(json["postagemId"].is_null());
        assert_eq!(json["eventoId"], 8);
        assert_eq!(json["conteudo"], "bora");
    }
}
