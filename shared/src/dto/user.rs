//! # User Data Transfer Objects
//!
//! Users as returned by `/usuario/*`, plus the compact author/participant
//! shapes embedded in feed items.

use serde::{Deserialize, Serialize};

use super::event::EventSummary;
use super::meta::Meta;
use super::post::Post;

/// Full user profile (`GET /usuario/{id}`, `GET /usuario/me`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "nomeUsuario")]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "fotoPerfil", default)]
    pub avatar_url: Option<String>,
    #[serde(rename = "biografia", default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub metas: Vec<Meta>,
    #[serde(rename = "postagens", default)]
    pub posts: Vec<Post>,
    #[serde(rename = "eventos", alias = "eventosCriados", default)]
    pub events: Vec<EventSummary>,
}

impl User {
    /// Goals the owner marked as public
    pub fn public_metas(&self) -> Vec<Meta> {
        self.metas.iter().filter(|m| m.public).cloned().collect()
    }
}

/// Search result row (`GET /usuario/buscar?query=`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "nomeUsuario")]
    pub username: String,
    #[serde(rename = "fotoPerfil", default)]
    pub avatar_url: Option<String>,
}

/// Author embedded in posts and events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "nomeUsuario", default)]
    pub username: String,
    #[serde(rename = "fotoPerfil", default)]
    pub avatar_url: Option<String>,
}

/// Confirmed participant of an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: i64,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "nomeUsuario", default)]
    pub username: String,
    #[serde(rename = "fotoPerfil", default)]
    pub avatar_url: Option<String>,
}

/// Own profile update (`PUT /usuario/me`)
///
/// The backend ignores an empty `senha`, so profile edits always send `""`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nomeUsuario")]
    pub username: String,
    #[serde(rename = "biografia")]
    pub bio: String,
    #[serde(rename = "fotoPerfil")]
    pub avatar_url: Option<String>,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}
