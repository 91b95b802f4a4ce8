// ── Item manager state ──
//
// One explicit struct holds everything the view shows. `AppState::update`
// is the only way it changes: it applies a `Msg` and returns the side
// effects to run. No I/O happens here, so every transition is testable
// without a runtime or a renderer.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::command::Command;
use crate::model::{Item, Page};
use crate::pagination::{PAGE_SIZE, Pagination};
use crate::toast::{Severity, TOAST_TTL, Toast, ToastId};
use crate::validate::validate;

pub const MSG_CREATED: &str = "Item created";
pub const MSG_UPDATED: &str = "Item updated";
pub const MSG_DELETED: &str = "Item deleted";
pub const FALLBACK_SAVE: &str = "Failed to save item";
pub const FALLBACK_DELETE: &str = "Failed to delete item";
pub const FALLBACK_LOAD: &str = "Failed to load items";

// ── Modal / draft ────────────────────────────────────────────────────

/// Whether the open form creates a new item or edits an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftMode {
    Create,
    Edit(Item),
}

/// Working copy of the form fields, kept as typed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub price: String,
}

impl Draft {
    fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal {
    #[default]
    Closed,
    Open { mode: DraftMode, draft: Draft },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Open { draft, .. } => Some(draft),
            Self::Closed => None,
        }
    }

    /// `"New Item"` / `"Edit Item"`
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Self::Open {
                mode: DraftMode::Create,
                ..
            } => Some("New Item"),
            Self::Open {
                mode: DraftMode::Edit(_),
                ..
            } => Some("Edit Item"),
            Self::Closed => None,
        }
    }
}

// ── Messages & effects ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

/// Everything that can happen to the item manager: user intents and
/// command outcomes.
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
pub enum Msg {
    // ── Fetching ──
    Refresh,
    NextPage,
    PreviousPage,
    PageLoaded { seq: u64, page: Page },
    PageFailed { seq: u64, message: String },

    // ── Modal ──
    OpenCreate,
    OpenEdit(Item),
    SetDraftName(String),
    SetDraftPrice(String),
    CancelDraft,
    SubmitDraft,
    SaveSucceeded(SaveKind),
    SaveFailed { message: String },

    // ── Delete ──
    RequestDelete(Item),
    ConfirmDelete,
    DeclineDelete,
    DeleteSucceeded,
    DeleteFailed { message: String },

    // ── Toast ──
    ToastExpired(ToastId),
    DismissToast,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Execute(Command),
    ScheduleToastExpiry { id: ToastId, after: Duration },
}

// ── State ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Last successfully fetched page.
    pub page: Page,
    /// Cursor for the next fetch; matches `page.offset` once it lands.
    pub offset: u64,
    /// A fetch is in flight.
    pub loading: bool,
    pub modal: Modal,
    pub toast: Option<Toast>,
    /// Item awaiting a yes/no delete confirmation.
    pub pending_delete: Option<Item>,
    /// Sequence number of the most recently issued fetch.
    fetch_seq: u64,
    next_toast_id: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.offset, PAGE_SIZE, self.page.total)
    }

    pub fn items(&self) -> &[Item] {
        &self.page.items
    }

    /// The empty-state message applies: nothing loading, nothing stored.
    pub fn is_empty(&self) -> bool {
        !self.loading && self.page.total == 0 && self.page.items.is_empty()
    }

    pub fn latest_fetch(&self) -> u64 {
        self.fetch_seq
    }

    /// Apply one message. `now` stamps toast expiry.
    pub fn update(&mut self, msg: Msg, now: Instant) -> Vec<Effect> {
        match msg {
            // ── Fetching ──
            Msg::Refresh => vec![self.load(self.offset)],
            Msg::NextPage => self
                .pagination()
                .next_offset()
                .map(|offset| self.load(offset))
                .into_iter()
                .collect(),
            Msg::PreviousPage => self
                .pagination()
                .previous_offset()
                .map(|offset| self.load(offset))
                .into_iter()
                .collect(),
            Msg::PageLoaded { seq, page } => self.on_page_loaded(seq, page),
            Msg::PageFailed { seq, message } => {
                if seq != self.fetch_seq {
                    debug!(seq, latest = self.fetch_seq, "dropping stale fetch failure");
                    return Vec::new();
                }
                self.loading = false;
                vec![self.show_toast(message, Severity::Error, now)]
            }

            // ── Modal ──
            Msg::OpenCreate => {
                self.modal = Modal::Open {
                    mode: DraftMode::Create,
                    draft: Draft::default(),
                };
                Vec::new()
            }
            Msg::OpenEdit(item) => {
                self.modal = Modal::Open {
                    draft: Draft::from_item(&item),
                    mode: DraftMode::Edit(item),
                };
                Vec::new()
            }
            Msg::SetDraftName(name) => {
                if let Modal::Open { draft, .. } = &mut self.modal {
                    draft.name = name;
                }
                Vec::new()
            }
            Msg::SetDraftPrice(price) => {
                if let Modal::Open { draft, .. } = &mut self.modal {
                    draft.price = price;
                }
                Vec::new()
            }
            Msg::CancelDraft => {
                self.modal = Modal::Closed;
                Vec::new()
            }
            Msg::SubmitDraft => self.submit(now),
            Msg::SaveSucceeded(kind) => {
                self.modal = Modal::Closed;
                let message = match kind {
                    SaveKind::Created => MSG_CREATED,
                    SaveKind::Updated => MSG_UPDATED,
                };
                vec![
                    self.show_toast(message.to_owned(), Severity::Success, now),
                    self.load(self.offset),
                ]
            }
            Msg::SaveFailed { message } => vec![self.show_toast(message, Severity::Error, now)],

            // ── Delete ──
            Msg::RequestDelete(item) => {
                self.pending_delete = Some(item);
                Vec::new()
            }
            Msg::ConfirmDelete => match self.pending_delete.take() {
                Some(item) => vec![Effect::Execute(Command::DeleteItem { id: item.id })],
                None => Vec::new(),
            },
            Msg::DeclineDelete => {
                self.pending_delete = None;
                Vec::new()
            }
            Msg::DeleteSucceeded => vec![
                self.show_toast(MSG_DELETED.to_owned(), Severity::Success, now),
                self.load(self.offset),
            ],
            Msg::DeleteFailed { message } => {
                vec![self.show_toast(message, Severity::Error, now)]
            }

            // ── Toast ──
            Msg::ToastExpired(id) => {
                if self.toast.as_ref().is_some_and(|t| t.id == id) {
                    self.toast = None;
                }
                Vec::new()
            }
            Msg::DismissToast => {
                self.toast = None;
                Vec::new()
            }
        }
    }

    // ── Transition helpers ───────────────────────────────────────────

    /// Issue a fetch for `offset`, superseding any fetch in flight.
    fn load(&mut self, offset: u64) -> Effect {
        self.offset = offset;
        self.loading = true;
        self.fetch_seq += 1;
        Effect::Execute(Command::LoadPage {
            offset,
            limit: PAGE_SIZE,
            seq: self.fetch_seq,
        })
    }

    fn on_page_loaded(&mut self, seq: u64, page: Page) -> Vec<Effect> {
        if seq != self.fetch_seq {
            debug!(seq, latest = self.fetch_seq, "dropping stale page");
            return Vec::new();
        }

        // Deleting the last item on the last page leaves the cursor past
        // the end; step back to the new last page.
        if page.items.is_empty() && page.total > 0 && self.offset >= page.total {
            let last = Pagination::new(self.offset, PAGE_SIZE, page.total).last_page_offset();
            debug!(from = self.offset, to = last, "offset past end, reloading last page");
            return vec![self.load(last)];
        }

        self.loading = false;
        self.page = page;
        Vec::new()
    }

    fn submit(&mut self, now: Instant) -> Vec<Effect> {
        let Modal::Open { mode, draft } = &self.modal else {
            return Vec::new();
        };

        match validate(&draft.name, &draft.price) {
            Ok(payload) => {
                let command = match mode {
                    DraftMode::Create => Command::CreateItem(payload),
                    DraftMode::Edit(item) => Command::UpdateItem {
                        id: item.id.clone(),
                        payload,
                    },
                };
                vec![Effect::Execute(command)]
            }
            Err(err) => vec![self.show_toast(err.to_string(), Severity::Error, now)],
        }
    }

    /// Replace the current toast and request its expiry.
    fn show_toast(&mut self, message: String, severity: Severity, now: Instant) -> Effect {
        self.next_toast_id += 1;
        let id = ToastId(self.next_toast_id);
        self.toast = Some(Toast {
            id,
            message,
            severity,
            expires_at: now + TOAST_TTL,
        });
        Effect::ScheduleToastExpiry {
            id,
            after: TOAST_TTL,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::command::ItemPayload;
    use crate::model::ItemId;

    fn item(id: &str, name: &str, price: f64) -> Item {
        Item {
            id: ItemId::from(id),
            name: name.into(),
            price,
            created_at: None,
            updated_at: None,
        }
    }

    fn page(offset: u64, total: u64, count: usize) -> Page {
        Page {
            items: (0..count)
                .map(|i| item(&format!("id-{i}"), &format!("Item {i}"), 1.0))
                .collect(),
            total,
            offset,
            limit: PAGE_SIZE,
        }
    }

    fn commands(effects: &[Effect]) -> Vec<&Command> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Execute(c) => Some(c),
                Effect::ScheduleToastExpiry { .. } => None,
            })
            .collect()
    }

    /// State after a completed first fetch.
    fn loaded(total: u64, offset: u64) -> AppState {
        let mut state = AppState::new();
        let now = Instant::now();
        state.update(Msg::Refresh, now);
        state.offset = offset;
        let seq = state.latest_fetch();
        let count = usize::try_from(total.saturating_sub(offset).min(20)).unwrap();
        state.update(
            Msg::PageLoaded {
                seq,
                page: page(offset, total, count),
            },
            now,
        );
        state
    }

    // ── Fetching ──

    #[test]
    fn refresh_sets_loading_and_issues_fetch() {
        let mut state = AppState::new();
        let effects = state.update(Msg::Refresh, Instant::now());

        assert!(state.loading);
        assert_eq!(
            effects,
            vec![Effect::Execute(Command::LoadPage {
                offset: 0,
                limit: 20,
                seq: 1
            })]
        );
    }

    #[test]
    fn page_loaded_replaces_page_and_clears_loading() {
        let state = loaded(45, 0);
        assert!(!state.loading);
        assert_eq!(state.items().len(), 20);
        assert_eq!(state.pagination().label(), "Page 1 of 3");
    }

    #[test]
    fn failed_fetch_keeps_previous_page() {
        let mut state = loaded(45, 0);
        let now = Instant::now();
        state.update(Msg::Refresh, now);
        let seq = state.latest_fetch();

        let effects = state.update(
            Msg::PageFailed {
                seq,
                message: FALLBACK_LOAD.into(),
            },
            now,
        );

        assert!(!state.loading);
        assert_eq!(state.items().len(), 20);
        let toast = state.toast.as_ref().unwrap();
        assert_eq!(toast.message, "Failed to load items");
        assert!(toast.is_error());
        assert!(matches!(effects[0], Effect::ScheduleToastExpiry { .. }));
    }

    #[test]
    fn stale_page_is_dropped() {
        let mut state = AppState::new();
        let now = Instant::now();
        state.update(Msg::Refresh, now);
        let first = state.latest_fetch();
        state.update(Msg::Refresh, now);

        state.update(
            Msg::PageLoaded {
                seq: first,
                page: page(0, 3, 3),
            },
            now,
        );

        assert!(state.loading);
        assert!(state.items().is_empty());
    }

    #[test]
    fn next_and_previous_move_by_one_page() {
        let mut state = loaded(45, 20);
        let now = Instant::now();

        let effects = state.update(Msg::NextPage, now);
        assert_eq!(
            commands(&effects),
            vec![&Command::LoadPage {
                offset: 40,
                limit: 20,
                seq: state.latest_fetch()
            }]
        );

        let mut state = loaded(45, 20);
        let effects = state.update(Msg::PreviousPage, now);
        assert!(matches!(
            commands(&effects)[..],
            [Command::LoadPage { offset: 0, .. }]
        ));
    }

    #[test]
    fn next_on_last_page_does_nothing() {
        let mut state = loaded(45, 40);
        assert!(state.update(Msg::NextPage, Instant::now()).is_empty());
        assert!(!state.loading);
        assert_eq!(state.offset, 40);
    }

    #[test]
    fn previous_on_first_page_does_nothing() {
        let mut state = loaded(45, 0);
        assert!(state.update(Msg::PreviousPage, Instant::now()).is_empty());
    }

    #[test]
    fn empty_page_past_end_steps_back() {
        let mut state = loaded(41, 40);
        let now = Instant::now();
        state.update(Msg::Refresh, now);
        let seq = state.latest_fetch();

        // Last item on page 3 was deleted elsewhere.
        let effects = state.update(
            Msg::PageLoaded {
                seq,
                page: page(40, 40, 0),
            },
            now,
        );

        assert!(state.loading);
        assert!(matches!(
            commands(&effects)[..],
            [Command::LoadPage { offset: 20, .. }]
        ));
    }

    #[test]
    fn empty_store_shows_empty_state() {
        let state = loaded(0, 0);
        assert!(state.is_empty());
        assert!(!state.pagination().is_visible());
    }

    // ── Modal ──

    #[test]
    fn open_edit_prefills_draft() {
        let mut state = AppState::new();
        state.update(Msg::OpenEdit(item("a", "Widget", 9.99)), Instant::now());

        assert_eq!(state.modal.title(), Some("Edit Item"));
        assert_eq!(
            state.modal.draft(),
            Some(&Draft {
                name: "Widget".into(),
                price: "9.99".into()
            })
        );
    }

    #[test]
    fn opening_while_open_replaces_draft() {
        let mut state = AppState::new();
        let now = Instant::now();
        state.update(Msg::OpenEdit(item("a", "Widget", 9.99)), now);
        state.update(Msg::OpenCreate, now);

        assert_eq!(state.modal.title(), Some("New Item"));
        assert_eq!(state.modal.draft(), Some(&Draft::default()));
    }

    #[test]
    fn draft_edits_are_ignored_when_closed() {
        let mut state = AppState::new();
        state.update(Msg::SetDraftName("x".into()), Instant::now());
        assert_eq!(state.modal, Modal::Closed);
    }

    #[test]
    fn invalid_submit_toasts_and_keeps_modal() {
        let mut state = AppState::new();
        let now = Instant::now();
        state.update(Msg::OpenCreate, now);
        state.update(Msg::SetDraftName("Widget".into()), now);
        state.update(Msg::SetDraftPrice("-0.01".into()), now);

        let effects = state.update(Msg::SubmitDraft, now);

        assert!(commands(&effects).is_empty());
        assert!(state.modal.is_open());
        assert_eq!(state.modal.draft().unwrap().price, "-0.01");
        assert_eq!(
            state.toast.as_ref().unwrap().message,
            "Price must be a non-negative number"
        );
    }

    #[test]
    fn valid_create_submit_issues_trimmed_payload() {
        let mut state = AppState::new();
        let now = Instant::now();
        state.update(Msg::OpenCreate, now);
        state.update(Msg::SetDraftName("  Widget  ".into()), now);
        state.update(Msg::SetDraftPrice("9.99".into()), now);

        let effects = state.update(Msg::SubmitDraft, now);

        assert_eq!(
            effects,
            vec![Effect::Execute(Command::CreateItem(ItemPayload {
                name: "Widget".into(),
                price: 9.99
            }))]
        );
        // Stays open until the server answers.
        assert!(state.modal.is_open());
    }

    #[test]
    fn edit_submit_targets_the_edited_item() {
        let mut state = AppState::new();
        let now = Instant::now();
        state.update(Msg::OpenEdit(item("abc", "Widget", 9.99)), now);
        state.update(Msg::SetDraftPrice("12".into()), now);

        let effects = state.update(Msg::SubmitDraft, now);
        assert!(matches!(
            commands(&effects)[..],
            [Command::UpdateItem { id, payload }]
                if *id == ItemId::from("abc") && (payload.price - 12.0).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn save_success_closes_modal_toasts_and_reloads() {
        let mut state = loaded(45, 20);
        let now = Instant::now();
        state.update(Msg::OpenCreate, now);

        let effects = state.update(Msg::SaveSucceeded(SaveKind::Created), now);

        assert_eq!(state.modal, Modal::Closed);
        let toast = state.toast.as_ref().unwrap();
        assert_eq!(toast.message, "Item created");
        assert_eq!(toast.severity, Severity::Success);
        assert_eq!(toast.expires_at, now + TOAST_TTL);
        assert!(matches!(
            commands(&effects)[..],
            [Command::LoadPage { offset: 20, .. }]
        ));
    }

    #[test]
    fn save_failure_keeps_modal_and_values() {
        let mut state = AppState::new();
        let now = Instant::now();
        state.update(Msg::OpenEdit(item("a", "Widget", 1.0)), now);
        state.update(Msg::SetDraftName("Gadget".into()), now);

        let effects = state.update(
            Msg::SaveFailed {
                message: "duplicate name".into(),
            },
            now,
        );

        assert!(commands(&effects).is_empty());
        assert_eq!(state.modal.draft().unwrap().name, "Gadget");
        assert_eq!(state.toast.as_ref().unwrap().message, "duplicate name");
    }

    // ── Delete ──

    #[test]
    fn delete_requires_confirmation() {
        let mut state = loaded(3, 0);
        let now = Instant::now();
        let target = state.items()[1].clone();

        assert!(state.update(Msg::RequestDelete(target.clone()), now).is_empty());
        assert_eq!(state.pending_delete.as_ref(), Some(&target));

        let effects = state.update(Msg::ConfirmDelete, now);
        assert_eq!(
            effects,
            vec![Effect::Execute(Command::DeleteItem { id: target.id })]
        );
        assert!(state.pending_delete.is_none());
    }

    #[test]
    fn declined_delete_issues_nothing() {
        let mut state = loaded(3, 0);
        let now = Instant::now();
        let target = state.items()[0].clone();

        state.update(Msg::RequestDelete(target), now);
        assert!(state.update(Msg::DeclineDelete, now).is_empty());
        assert!(state.pending_delete.is_none());
        assert_eq!(state.items().len(), 3);
        assert!(state.toast.is_none());
    }

    #[test]
    fn confirm_without_request_is_ignored() {
        let mut state = AppState::new();
        assert!(state.update(Msg::ConfirmDelete, Instant::now()).is_empty());
    }

    #[test]
    fn delete_success_toasts_and_reloads() {
        let mut state = loaded(3, 0);
        let effects = state.update(Msg::DeleteSucceeded, Instant::now());
        assert_eq!(state.toast.as_ref().unwrap().message, "Item deleted");
        assert_eq!(commands(&effects).len(), 1);
    }

    // ── Toast ──

    #[test]
    fn newer_toast_survives_older_expiry() {
        let mut state = AppState::new();
        let now = Instant::now();
        state.update(Msg::DeleteFailed { message: "first".into() }, now);
        let first = state.toast.as_ref().unwrap().id;
        state.update(Msg::DeleteFailed { message: "second".into() }, now);

        state.update(Msg::ToastExpired(first), now);
        assert_eq!(state.toast.as_ref().unwrap().message, "second");

        let second = state.toast.as_ref().unwrap().id;
        state.update(Msg::ToastExpired(second), now);
        assert!(state.toast.is_none());
    }
}
