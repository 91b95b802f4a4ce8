//! Items screen: header, item table, empty state and pager.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use throbber_widgets_tui::{Throbber, ThrobberState};

use stockroom_core::{AppState, Item, Msg};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

#[derive(Default)]
pub struct ItemsScreen {
    /// Row cursor on the current page; clamped against the page on use.
    selected: usize,
    throbber_state: ThrobberState,
}

impl ItemsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn selected_index(&self, state: &AppState) -> usize {
        self.selected.min(state.items().len().saturating_sub(1))
    }

    /// Nothing is selectable while a fetch is in flight: the rows are
    /// hidden and may belong to the page being left.
    fn selected_item<'a>(&self, state: &'a AppState) -> Option<&'a Item> {
        if state.loading {
            return None;
        }
        state.items().get(self.selected_index(state))
    }

    fn move_selection(&mut self, delta: isize, state: &AppState) {
        let len = state.items().len();
        if len == 0 {
            return;
        }
        self.selected = self
            .selected_index(state)
            .saturating_add_signed(delta)
            .min(len - 1);
    }

    // ── Rendering pieces ────────────────────────────────────────────

    #[allow(clippy::unused_self)]
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::horizontal([Constraint::Min(20), Constraint::Length(20)]).split(area);

        let title = Text::from(vec![
            Line::from(Span::styled(
                " Item Manager",
                Style::default()
                    .fg(theme::ELECTRIC_PURPLE)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " Manage your inventory with style",
                theme::key_hint(),
            )),
        ]);
        frame.render_widget(Paragraph::new(title), cols[0]);

        let add = Line::from(vec![
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("Add New Item ", Style::default().fg(theme::SUCCESS_GREEN)),
        ]);
        frame.render_widget(Paragraph::new(add).alignment(Alignment::Right), cols[1]);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let header = Row::new(vec![
            Cell::from("Name").style(theme::table_header()),
            Cell::from(Line::from("Price").alignment(Alignment::Right))
                .style(theme::table_header()),
            Cell::from("ID").style(theme::table_header()),
            Cell::from("Updated").style(theme::table_header()),
        ]);

        let selected_idx = self.selected_index(state);
        let rows: Vec<Row> = state
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let is_selected = i == selected_idx;
                let prefix = if is_selected { "▸" } else { " " };
                let updated = item
                    .updated_at
                    .or(item.created_at)
                    .map_or_else(|| "—".into(), |t| t.format("%Y-%m-%d %H:%M").to_string());

                Row::new(vec![
                    Cell::from(format!("{prefix}{}", item.name)).style(
                        Style::default().fg(theme::NEON_CYAN).add_modifier(
                            if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            },
                        ),
                    ),
                    Cell::from(Line::from(item.display_price()).alignment(Alignment::Right))
                        .style(theme::price()),
                    Cell::from(item.id.short()),
                    Cell::from(updated),
                ])
                .style(if is_selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                })
            })
            .collect();

        let widths = [
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(17),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(2)
            .row_highlight_style(theme::table_selected());

        let mut table_state = TableState::default().with_selected(Some(selected_idx));
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    #[allow(clippy::unused_self)]
    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

        let text = Text::from(vec![
            Line::from(Span::styled(
                "No items found.",
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(vec![
                Span::styled("Create one to get started. Press ", theme::key_hint()),
                Span::styled("a", theme::key_hint_key()),
            ]),
        ]);
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), layout[1]);
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        let throbber = Throbber::default()
            .label(" Loading items...")
            .style(Style::default().fg(theme::NEON_CYAN))
            .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
        let cols = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(18),
            Constraint::Min(0),
        ])
        .split(layout[1]);
        frame.render_stateful_widget(throbber, cols[1], &mut self.throbber_state.clone());
    }

    #[allow(clippy::unused_self)]
    fn render_pager(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let pagination = state.pagination();
        if pagination.is_visible() {
            let enabled = |on: bool| {
                if on {
                    theme::key_hint_key()
                } else {
                    theme::key_hint_disabled()
                }
            };
            let line = Line::from(vec![
                Span::styled("◂ h ", enabled(pagination.has_previous())),
                Span::styled("prev   ", theme::key_hint()),
                Span::styled(pagination.label(), Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    format!(" ({} items)   ", state.page.total),
                    theme::key_hint(),
                ),
                Span::styled("next ", theme::key_hint()),
                Span::styled("l ▸", enabled(pagination.has_next())),
            ]);
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
        }
    }
}

impl Component for ItemsScreen {
    fn handle_key_event(&mut self, key: KeyEvent, state: &AppState) -> Result<Option<Action>> {
        let pagination = state.pagination();
        let action: Option<Action> = match (key.modifiers, key.code) {
            (_, KeyCode::Char('j') | KeyCode::Down) => {
                self.move_selection(1, state);
                None
            }
            (_, KeyCode::Char('k') | KeyCode::Up) => {
                self.move_selection(-1, state);
                None
            }
            (_, KeyCode::Char('g') | KeyCode::Home) => {
                self.selected = 0;
                None
            }
            (_, KeyCode::Char('G') | KeyCode::End) => {
                self.selected = state.items().len().saturating_sub(1);
                None
            }

            (_, KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown)
                if pagination.has_next() =>
            {
                Some(Msg::NextPage.into())
            }
            (_, KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp)
                if pagination.has_previous() =>
            {
                Some(Msg::PreviousPage.into())
            }
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Msg::Refresh.into()),

            (_, KeyCode::Char('a' | 'n')) => Some(Msg::OpenCreate.into()),
            (_, KeyCode::Char('e') | KeyCode::Enter) => self
                .selected_item(state)
                .map(|item| Msg::OpenEdit(item.clone()).into()),
            (_, KeyCode::Char('d') | KeyCode::Delete) => self
                .selected_item(state)
                .map(|item| Msg::RequestDelete(item.clone()).into()),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action, state: &AppState) -> Result<Option<Action>> {
        match action {
            Action::Tick if state.loading => self.throbber_state.calc_next(),
            Action::Item(Msg::NextPage | Msg::PreviousPage) => self.selected = 0,
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let layout = Layout::vertical([
            Constraint::Length(3), // header
            Constraint::Min(3),    // item list
            Constraint::Length(1), // pager
        ])
        .split(area);

        self.render_header(frame, layout[0]);

        let block = Block::default()
            .title(format!(" Items ({}) ", state.page.total))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if state.modal.is_open() || state.pending_delete.is_some() {
                theme::border_default()
            } else {
                theme::border_focused()
            });
        let inner = block.inner(layout[1]);
        frame.render_widget(block, layout[1]);

        // The previous rows never show under a new page's pager.
        if state.loading {
            self.render_loading(frame, inner);
        } else if state.is_empty() {
            self.render_empty(frame, inner);
        } else {
            self.render_table(frame, inner, state);
        }

        self.render_pager(frame, layout[2], state);
    }

    fn id(&self) -> &'static str {
        "Items"
    }
}
