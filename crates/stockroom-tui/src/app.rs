//! Application core: event loop, key routing and overlays.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use stockroom_core::{AppState, Controller, Item, ItemsApi, Msg, Severity, Toast};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::items::ItemsScreen;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::item_form::ItemForm;

/// Top-level application state and event loop.
pub struct App<A: ItemsApi> {
    /// Owns the item state; every item change goes through it.
    controller: Controller<A>,
    screen: ItemsScreen,
    form: ItemForm,
    /// Whether the app should keep running.
    running: bool,
    help_visible: bool,
    /// Shown in the status bar.
    server_label: String,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl<A: ItemsApi> App<A> {
    pub fn new(controller: Controller<A>, server_label: String) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            screen: ItemsScreen::new(),
            form: ItemForm::new(),
            running: true,
            help_visible: false,
            server_label,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let (w, h) = tui.size().unwrap_or((80, 24));
        debug!(w, h, "terminal size");

        self.controller.start();

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(server = %self.server_label, "TUI event loop started");

        while self.running {
            tokio::select! {
                event = events.next() => {
                    let Some(event) = event else { break };
                    self.handle_event(event)?;
                }
                // Finished requests and toast expiries land without
                // waiting for terminal input.
                () = self.controller.next() => {
                    self.controller.drain();
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.controller.shutdown();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let action = match event {
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            Event::Tick => Some(Action::Tick),
            Event::Render => Some(Action::Render),
        };
        if let Some(action) = action {
            self.action_tx.send(action)?;
        }
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        self.controller.state()
    }

    /// Map a key event to an action. Overlays capture input in order:
    /// delete confirmation, item form, help; otherwise global keys, then
    /// the items screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        let state = self.controller.state();

        if state.pending_delete.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Msg::ConfirmDelete.into()),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Msg::DeclineDelete.into()),
                _ => None,
            });
        }

        if state.modal.is_open() {
            return self.form.handle_key_event(key, state);
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?' | 'q') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
            KeyCode::Esc if state.toast.is_some() => return Ok(Some(Msg::DismissToast.into())),
            _ => {}
        }

        debug!(component = self.screen.id(), ?key, "delegating key");
        self.screen.handle_key_event(key, state)
    }

    /// Apply a single action, then let components observe it.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::Item(msg) => self.controller.dispatch(msg.clone()),
            Action::Resize(w, h) => debug!(w, h, "terminal resized"),
            Action::Tick | Action::Render => {}
        }

        let state = self.controller.state();
        for component in [&mut self.screen as &mut dyn Component, &mut self.form] {
            if let Some(follow_up) = component.update(action, state)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let state = self.state();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.screen.render(frame, layout[0], state);
        self.render_status_bar(frame, layout[1]);

        // Overlays, last = topmost
        self.form.render(frame, area, state);
        if let Some(toast) = &state.toast {
            render_toast(frame, area, toast);
        }
        if let Some(item) = &state.pending_delete {
            render_confirm_dialog(frame, area, item);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" ● ", Style::default().fg(theme::SUCCESS_GREEN)),
            Span::styled(&self.server_label, Style::default().fg(theme::DIM_WHITE)),
            Span::styled(
                " │ a add  e edit  d delete  r refresh  ? help  q quit",
                theme::key_hint(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Rect of `width` x `height` centered in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Toast in the bottom-right corner, above the status bar.
fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let msg_len = u16::try_from(toast.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len
        .saturating_add(6)
        .clamp(20, 60)
        .min(area.width.saturating_sub(2));
    let height = 3u16;
    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 1);
    let toast_area = Rect::new(area.x + x, area.y + y, width, height);

    let (border_color, icon) = match toast.severity {
        Severity::Success => (theme::SUCCESS_GREEN, "✓"),
        Severity::Error => (theme::ERROR_RED, "✗"),
    };

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
        Span::styled(&toast.message, Style::default().fg(theme::DIM_WHITE)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, item: &Item) {
    let dialog_area = centered(area, 50, 6);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Delete Item ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::ELECTRIC_YELLOW))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let text = vec![
        Line::from(Span::styled(
            "  Are you sure you want to delete this item?",
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(vec![
            Span::styled("  ", theme::key_hint()),
            Span::styled(&item.name, Style::default().fg(theme::NEON_CYAN)),
            Span::styled(format!("  {}", item.display_price()), theme::price()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("delete    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered(area, 52, 19);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let section = |title: &'static str| {
        [
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::NEON_CYAN),
            )),
            Line::from(Span::styled(
                format!("  {}", "─".repeat(title.len())),
                theme::key_hint(),
            )),
        ]
    };
    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };

    let mut lines = vec![Line::from("")];
    lines.extend(section("Items"));
    lines.push(entry("j/k ↑/↓", "Move selection"));
    lines.push(entry("a / n", "Add new item"));
    lines.push(entry("e / Enter", "Edit selected item"));
    lines.push(entry("d / Del", "Delete selected item"));
    lines.push(entry("h/l ←/→", "Previous / next page"));
    lines.push(entry("r", "Refresh"));
    lines.push(Line::from(""));
    lines.extend(section("Form"));
    lines.push(entry("Tab", "Switch field"));
    lines.push(entry("Enter", "Save"));
    lines.push(entry("Esc", "Cancel"));
    lines.push(Line::from(""));
    lines.push(entry("q", "Quit"));
    lines.push(Line::from(Span::styled(
        "                             Esc or ? to close",
        theme::key_hint(),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use stockroom_core::{CoreError, ItemId, ItemPayload, Modal, Page};

    use super::*;

    /// Backend that is never expected to answer within a test.
    struct NeverApi;

    impl ItemsApi for NeverApi {
        async fn list(&self, _offset: u64, _limit: u32) -> Result<Page, CoreError> {
            std::future::pending().await
        }
        async fn get(&self, _id: &ItemId) -> Result<Item, CoreError> {
            std::future::pending().await
        }
        async fn create(&self, _payload: &ItemPayload) -> Result<Option<Item>, CoreError> {
            std::future::pending().await
        }
        async fn update(
            &self,
            _id: &ItemId,
            _payload: &ItemPayload,
        ) -> Result<Option<Item>, CoreError> {
            std::future::pending().await
        }
        async fn delete(&self, _id: &ItemId) -> Result<(), CoreError> {
            std::future::pending().await
        }
    }

    fn app() -> App<NeverApi> {
        App::new(Controller::new(NeverApi), "http://localhost:8000/api/".into())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Feed a key through routing and processing, like the event loop does.
    fn press(app: &mut App<NeverApi>, code: KeyCode) {
        if let Some(action) = app.handle_key_event(key(code)).unwrap() {
            app.process_action(&action).unwrap();
        }
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(&action).unwrap();
        }
    }

    fn sample() -> Item {
        Item {
            id: ItemId::from("abc"),
            name: "Widget".into(),
            price: 9.99,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn form_captures_keys_until_cancelled() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert!(app.state().modal.is_open());

        // 'q' is text while the form is open
        for ch in "qty".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        assert!(app.running);
        assert_eq!(app.state().modal.draft().unwrap().name, "qty");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state().modal, Modal::Closed);
    }

    #[tokio::test]
    async fn invalid_submit_keeps_form_and_toasts() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Enter);

        assert!(app.state().modal.is_open());
        let toast = app.state().toast.as_ref().unwrap();
        assert_eq!(toast.message, "Name is required");
        assert!(toast.is_error());
    }

    #[tokio::test]
    async fn delete_confirmation_can_be_declined() {
        let mut app = app();
        app.process_action(&Msg::RequestDelete(sample()).into())
            .unwrap();

        // Everything but y/n/Esc is swallowed
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert!(app.state().pending_delete.is_some());

        press(&mut app, KeyCode::Char('n'));
        assert!(app.state().pending_delete.is_none());
    }

    #[tokio::test]
    async fn help_toggles_and_q_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_visible);
        press(&mut app, KeyCode::Esc);
        assert!(!app.help_visible);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn renders_overlays() {
        let mut app = app();
        app.process_action(&Msg::RequestDelete(sample()).into())
            .unwrap();

        let mut terminal =
            ratatui::Terminal::new(ratatui::backend::TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("Are you sure you want to delete this item?"));
        assert!(text.contains("Widget"));
    }
}
