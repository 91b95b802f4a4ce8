//! Wire types for the items REST API.
//!
//! Field names are snake_case on the wire, matching the server's JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Item identifier as sent by the server.
///
/// The reference server uses UUID strings, but numeric ids are accepted
/// so the client works against simpler backends too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A single item, from `GET /items/{id}`, `POST /items`, `PUT /items/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: RawId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of items, from `GET /items?limit=&offset=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
    pub total: u64,
    /// Echoed back by the reference server; optional elsewhere.
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u64>,
}

/// Body for `POST /items` and `PUT /items/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub price: f64,
}
