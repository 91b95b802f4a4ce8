// ── Item identity ──
//
// The server assigns ids; the client treats them as opaque. The reference
// backend hands out UUIDs, but any string (or number, rendered as text)
// round-trips unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Server-assigned, immutable item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Uuid(Uuid),
    Opaque(String),
}

impl ItemId {
    /// Short form for narrow table columns: first UUID group, or the
    /// whole opaque id.
    pub fn short(&self) -> String {
        match self {
            Self::Uuid(u) => u.simple().to_string().chars().take(8).collect(),
            Self::Opaque(s) => s.clone(),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Opaque(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for ItemId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<Uuid> for ItemId {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        match Uuid::parse_str(&s) {
            Ok(u) => Self::Uuid(u),
            Err(_) => Self::Opaque(s),
        }
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}
