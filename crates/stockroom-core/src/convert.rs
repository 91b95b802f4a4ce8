// ── API-to-domain type conversions ──
//
// Bridges raw `stockroom_api` wire types into `stockroom_core::model`
// domain types, and domain payloads back into request bodies.

use stockroom_api::types::{ItemListResponse, ItemRequest, ItemResponse, RawId};

use crate::command::ItemPayload;
use crate::model::{Item, ItemId, Page};

// ── Identity ───────────────────────────────────────────────────────

impl From<RawId> for ItemId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => ItemId::from(s),
            RawId::Number(n) => ItemId::Opaque(n.to_string()),
        }
    }
}

// ── Item ───────────────────────────────────────────────────────────

impl From<ItemResponse> for Item {
    fn from(raw: ItemResponse) -> Self {
        Item {
            id: raw.id.into(),
            name: raw.name,
            price: raw.price,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

// ── Page ───────────────────────────────────────────────────────────

impl Page {
    /// Build a page from a list response, falling back to the requested
    /// window when the server does not echo `limit` / `offset`.
    pub fn from_response(raw: ItemListResponse, offset: u64, limit: u32) -> Self {
        Page {
            items: raw.items.into_iter().map(Item::from).collect(),
            total: raw.total,
            offset: raw.offset.unwrap_or(offset),
            limit: raw.limit.unwrap_or(limit),
        }
    }
}

// ── Requests ───────────────────────────────────────────────────────

impl From<&ItemPayload> for ItemRequest {
    fn from(payload: &ItemPayload) -> Self {
        ItemRequest {
            name: payload.name.clone(),
            price: payload.price,
        }
    }
}
