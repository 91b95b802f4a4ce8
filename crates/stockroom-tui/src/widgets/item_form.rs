//! Create/edit overlay for a single item.
//!
//! The draft text lives in the controller's `Modal`; this widget only
//! tracks which field has focus and turns keystrokes into draft messages.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use stockroom_core::validate::MAX_NAME_LEN;
use stockroom_core::{AppState, Draft, Msg};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Price,
}

impl Field {
    fn toggle(self) -> Self {
        match self {
            Self::Name => Self::Price,
            Self::Price => Self::Name,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Price => "Price",
        }
    }

    fn value(self, draft: &Draft) -> &str {
        match self {
            Self::Name => &draft.name,
            Self::Price => &draft.price,
        }
    }

    /// Message that replaces this field's draft text with `text`.
    fn set(self, text: String) -> Msg {
        match self {
            Self::Name => Msg::SetDraftName(text),
            Self::Price => Msg::SetDraftPrice(text),
        }
    }
}

#[derive(Debug, Default)]
pub struct ItemForm {
    field: Field,
}

impl ItemForm {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Keep the end of `text` visible in `width` columns.
fn tail(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_owned();
    }
    let skip = len - width + 1;
    format!("…{}", text.chars().skip(skip).collect::<String>())
}

impl Component for ItemForm {
    fn handle_key_event(&mut self, key: KeyEvent, state: &AppState) -> Result<Option<Action>> {
        let Some(draft) = state.modal.draft() else {
            return Ok(None);
        };

        let action: Option<Action> = match key.code {
            KeyCode::Esc => Some(Msg::CancelDraft.into()),
            KeyCode::Enter => Some(Msg::SubmitDraft.into()),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.field = self.field.toggle();
                None
            }
            KeyCode::Backspace => {
                let mut text = self.field.value(draft).to_owned();
                text.pop().map(|_| self.field.set(text).into())
            }
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut text = self.field.value(draft).to_owned();
                text.push(ch);
                Some(self.field.set(text).into())
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action, _state: &AppState) -> Result<Option<Action>> {
        if let Action::Item(Msg::OpenCreate | Msg::OpenEdit(_)) = action {
            self.field = Field::Name;
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let (Some(draft), Some(title)) = (state.modal.draft(), state.modal.title()) else {
            return;
        };

        let overlay_w = 52u16.min(area.width.saturating_sub(4));
        let overlay_h = 8u16.min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
        let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
        let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .title(format!(" {title} "))
            .title_style(
                Style::default()
                    .fg(theme::ELECTRIC_YELLOW)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(theme::border_focused());

        let inner = block.inner(overlay_area);
        frame.render_widget(block, overlay_area);

        let label = Style::default().fg(theme::DIM_WHITE);
        let focused_label = Style::default()
            .fg(theme::ELECTRIC_YELLOW)
            .add_modifier(Modifier::BOLD);
        let value_style = Style::default().fg(theme::NEON_CYAN);
        // marker + label + cursor
        let value_width = usize::from(inner.width.saturating_sub(12)).max(1);

        let mut lines = vec![Line::from("")];
        for field in [Field::Name, Field::Price] {
            let is_focused = field == self.field;
            let lbl_style = if is_focused { focused_label } else { label };
            let marker = if is_focused { "▸ " } else { "  " };
            let cursor = if is_focused { "▎" } else { "" };

            lines.push(Line::from(vec![
                Span::styled(marker, lbl_style),
                Span::styled(format!("{:<8}", field.label()), lbl_style),
                Span::styled(tail(field.value(draft), value_width), value_style),
                Span::styled(cursor, Style::default().fg(theme::ELECTRIC_YELLOW)),
            ]));
        }

        let name_len = draft.name.trim().chars().count();
        let counter_style = if name_len > MAX_NAME_LEN {
            Style::default().fg(theme::ERROR_RED)
        } else {
            theme::key_hint()
        };
        lines.push(Line::from(Span::styled(
            format!("            {name_len}/{MAX_NAME_LEN}"),
            counter_style,
        )));

        lines.push(Line::from(vec![
            Span::styled(" Tab", theme::key_hint_key()),
            Span::styled(" next  ", theme::key_hint()),
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(" save  ", theme::key_hint()),
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" cancel", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn id(&self) -> &'static str {
        "ItemForm"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn open_create() -> AppState {
        let mut state = AppState::new();
        state.update(Msg::OpenCreate, Instant::now());
        state
    }

    #[test]
    fn typing_appends_to_focused_field() {
        let mut state = open_create();
        state.update(Msg::SetDraftName("Wid".into()), Instant::now());
        let mut form = ItemForm::new();

        let action = form
            .handle_key_event(key(KeyCode::Char('g')), &state)
            .unwrap();
        assert_eq!(action, Some(Action::Item(Msg::SetDraftName("Widg".into()))));

        form.handle_key_event(key(KeyCode::Tab), &state).unwrap();
        assert_eq!(form.field, Field::Price);
        let action = form
            .handle_key_event(key(KeyCode::Char('9')), &state)
            .unwrap();
        assert_eq!(action, Some(Action::Item(Msg::SetDraftPrice("9".into()))));
    }

    #[test]
    fn backspace_on_empty_field_is_a_noop() {
        let state = open_create();
        let mut form = ItemForm::new();
        let action = form
            .handle_key_event(key(KeyCode::Backspace), &state)
            .unwrap();
        assert_eq!(action, None);
    }

    #[test]
    fn enter_submits_and_esc_cancels() {
        let state = open_create();
        let mut form = ItemForm::new();
        assert_eq!(
            form.handle_key_event(key(KeyCode::Enter), &state).unwrap(),
            Some(Action::Item(Msg::SubmitDraft))
        );
        assert_eq!(
            form.handle_key_event(key(KeyCode::Esc), &state).unwrap(),
            Some(Action::Item(Msg::CancelDraft))
        );
    }

    #[test]
    fn reopening_resets_focus_to_name() {
        let state = open_create();
        let mut form = ItemForm::new();
        form.handle_key_event(key(KeyCode::Tab), &state).unwrap();
        form.update(&Action::Item(Msg::OpenCreate), &state).unwrap();
        assert_eq!(form.field, Field::Name);
    }

    #[test]
    fn closed_modal_ignores_keys() {
        let state = AppState::new();
        let mut form = ItemForm::new();
        assert_eq!(
            form.handle_key_event(key(KeyCode::Char('x')), &state)
                .unwrap(),
            None
        );
    }

    #[test]
    fn tail_keeps_end_visible() {
        assert_eq!(tail("abc", 5), "abc");
        assert_eq!(tail("abcdefgh", 4), "…fgh");
    }
}
