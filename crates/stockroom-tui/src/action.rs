//! UI actions. Item-level intents are wrapped core messages; the rest is
//! terminal plumbing.

use stockroom_core::Msg;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Tick,
    Render,
    Resize(u16, u16),
    ToggleHelp,
    /// Forwarded to the item controller.
    Item(Msg),
}

impl From<Msg> for Action {
    fn from(msg: Msg) -> Self {
        Self::Item(msg)
    }
}
