//! # Event Data Transfer Objects
//!
//! Events appear in the unified feed and on their own detail screen
//! (`GET /evento/{id}`); both use the same [`Event`] shape.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::user::{Author, Participant};

/// Event as sent in the feed and by `GET /evento/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "localizacao", default)]
    pub location: String,
    #[serde(rename = "dataInicio", with = "local_datetime")]
    pub starts_at: NaiveDateTime,
    #[serde(rename = "dataFim", with = "local_datetime")]
    pub ends_at: NaiveDateTime,
    #[serde(rename = "autor")]
    pub author: Author,
    #[serde(rename = "midia", default)]
    pub media_url: String,
    #[serde(rename = "numCurtidas", default)]
    pub like_count: u32,
    #[serde(rename = "numComentarios", default)]
    pub comment_count: u32,
    #[serde(rename = "numCompartilhamentos", default)]
    pub share_count: u32,
    #[serde(rename = "numParticipantes", default)]
    pub participant_count: u32,
    #[serde(rename = "participantes", default)]
    pub participants: Vec<Participant>,
    #[serde(rename = "usuarioConfirmado", default)]
    pub attending: bool,
    #[serde(rename = "usuarioCurtiu", default)]
    pub liked: bool,
}

impl Event {
    /// Apply a confirmed attendance change locally.
    pub fn set_attending(&mut self, attending: bool) {
        if self.attending == attending {
            return;
        }
        self.attending = attending;
        if attending {
            self.participant_count += 1;
        } else {
            self.participant_count = self.participant_count.saturating_sub(1);
        }
    }
}

/// Compact event listed on a user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventSummary {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "midia", default)]
    pub media_url: String,
}

/// Event creation (`POST /evento`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateEventRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "midia")]
    pub media_url: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "localizacao")]
    pub location: String,
    #[serde(rename = "dataInicio", with = "local_datetime")]
    pub starts_at: NaiveDateTime,
    #[serde(rename = "dataFim", with = "local_datetime")]
    pub ends_at: NaiveDateTime,
}

/// Local (zone-less) timestamps as the backend writes them: `2025-03-01T18:30:00`.
///
/// RFC 3339 input with an offset is accepted and reduced to its local wall time.
pub mod local_datetime {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date-time: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        raw.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
    }
}
