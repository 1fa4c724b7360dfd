//! # Goal ("Meta") Data Transfer Objects

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion state of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaStatus {
    #[serde(rename = "PENDENTE")]
    Pending,
    #[serde(rename = "CONCLUIDA")]
    Done,
}

impl MetaStatus {
    pub fn toggled(self) -> Self {
        match self {
            MetaStatus::Pending => MetaStatus::Done,
            MetaStatus::Done => MetaStatus::Pending,
        }
    }
}

/// Goal owned by a single user (`GET /meta/me`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meta {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "publica", default)]
    pub public: bool,
    pub status: MetaStatus,
    #[serde(rename = "dataFim", with = "api_date")]
    pub due: NaiveDate,
}

/// Status update (`PUT /meta/{id}`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateMetaRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub status: MetaStatus,
    #[serde(rename = "dataFim", with = "api_date")]
    pub due: NaiveDate,
}

impl UpdateMetaRequest {
    /// Body that flips `meta` to the opposite status
    pub fn toggle_of(meta: &Meta) -> Self {
        Self {
            name: meta.name.clone(),
            status: meta.status.toggled(),
            due: meta.due,
        }
    }
}

/// Goal creation (`POST /meta`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateMetaRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "dataInicio", with = "api_date")]
    pub starts_on: NaiveDate,
    #[serde(rename = "dataFim", with = "api_date")]
    pub due: NaiveDate,
}

/// `YYYY-MM-DD` dates. Reading also tolerates a full timestamp and keeps its date part.
pub mod api_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let date_part = raw.get(..10).unwrap_or(&raw);
        NaiveDate::parse_from_str(date_part, FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("invalid date {raw}: {e}")))
    }
}
