//! Component trait, the building block for every UI element.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use stockroom_core::AppState;

use crate::action::Action;

/// Every UI element implements Component.
///
/// Components never own item data: they read the controller's `AppState`
/// and answer with `Action`s. Local view state (selection, field focus,
/// spinner frame) lives on the component.
pub trait Component: Send {
    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, key: KeyEvent, state: &AppState) -> Result<Option<Action>>;

    /// Observe a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action, _state: &AppState) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState);

    /// Unique identifier for this component.
    fn id(&self) -> &str;
}
