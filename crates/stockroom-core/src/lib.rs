//! Item manager logic between `stockroom-api` and UI consumers (CLI / TUI).
//!
//! - **[`AppState`]**: every piece of view state in one struct. Changed
//!   only by [`AppState::update`], a pure transition from a [`Msg`] to a
//!   list of [`Effect`]s.
//!
//! - **[`Command`]**: the side-effecting requests transitions can ask for
//!   (load a page, create, update, delete). The [`Dispatcher`] runs them
//!   against any [`ItemsApi`] and turns the outcome back into a [`Msg`].
//!
//! - **[`Controller`]**: owns the state, spawns commands, and feeds their
//!   results and toast expiries back through an inbox channel.
//!
//! - **[`validate()`]** and **[`Pagination`]**: the form and paging rules,
//!   shared by the TUI and the CLI.

pub mod api;
pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod pagination;
pub mod state;
pub mod toast;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::ItemsApi;
pub use command::{Command, ItemPayload};
pub use config::ClientConfig;
pub use controller::Controller;
pub use dispatcher::Dispatcher;
pub use error::CoreError;
pub use model::{Item, ItemId, Page, format_price};
pub use pagination::{PAGE_SIZE, Pagination};
pub use state::{AppState, Draft, DraftMode, Effect, Modal, Msg, SaveKind};
pub use toast::{Severity, TOAST_TTL, Toast, ToastId};
pub use validate::{ValidationError, validate};
