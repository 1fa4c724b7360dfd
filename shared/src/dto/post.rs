use serde::{Deserialize, Serialize};

/// Post listed on a user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "midia", default)]
    pub media_url: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "dataPublicacao", default)]
    pub published_at: Option<String>,
}

/// Post creation (`POST /postagem`). The author is taken from the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePostRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "midia")]
    pub media_url: String,
    #[serde(rename = "descricao")]
    pub description: String,
}
