// ── Command API ──
//
// Every network side effect is a `Command`. Transitions produce them;
// the `Dispatcher` runs them against an `ItemsApi` and turns the outcome
// back into a `Msg`.

use serde::{Deserialize, Serialize};

use crate::model::ItemId;

/// Validated create/update body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    pub price: f64,
}

/// All side-effecting requests the item manager can issue.
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
pub enum Command {
    /// Fetch one page. `seq` identifies the fetch so stale responses
    /// can be discarded.
    LoadPage { offset: u64, limit: u32, seq: u64 },
    CreateItem(ItemPayload),
    UpdateItem { id: ItemId, payload: ItemPayload },
    DeleteItem { id: ItemId },
}

impl Command {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
