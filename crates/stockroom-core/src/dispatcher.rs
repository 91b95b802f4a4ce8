// ── Command dispatcher ──
//
// Runs one `Command` against an `ItemsApi` and reports the outcome as the
// `Msg` the state machine expects next. Errors never escape: each becomes
// a failure message carrying the text for the error toast.

use tracing::{debug, warn};

use crate::api::ItemsApi;
use crate::command::Command;
use crate::state::{FALLBACK_DELETE, FALLBACK_LOAD, FALLBACK_SAVE, Msg, SaveKind};

pub struct Dispatcher<A> {
    api: A,
}

impl<A: ItemsApi> Dispatcher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn execute(&self, command: Command) -> Msg {
        debug!(command = command.name(), "executing");

        match command {
            Command::LoadPage { offset, limit, seq } => {
                match self.api.list(offset, limit).await {
                    Ok(page) => Msg::PageLoaded { seq, page },
                    Err(e) => {
                        warn!(error = %e, offset, "list failed");
                        Msg::PageFailed {
                            seq,
                            message: e.user_message(FALLBACK_LOAD),
                        }
                    }
                }
            }
            Command::CreateItem(payload) => match self.api.create(&payload).await {
                Ok(_) => Msg::SaveSucceeded(SaveKind::Created),
                Err(e) => {
                    warn!(error = %e, "create failed");
                    Msg::SaveFailed {
                        message: e.user_message(FALLBACK_SAVE),
                    }
                }
            },
            Command::UpdateItem { id, payload } => match self.api.update(&id, &payload).await {
                Ok(_) => Msg::SaveSucceeded(SaveKind::Updated),
                Err(e) => {
                    warn!(error = %e, %id, "update failed");
                    Msg::SaveFailed {
                        message: e.user_message(FALLBACK_SAVE),
                    }
                }
            },
            Command::DeleteItem { id } => match self.api.delete(&id).await {
                Ok(()) => Msg::DeleteSucceeded,
                Err(e) => {
                    warn!(error = %e, %id, "delete failed");
                    Msg::DeleteFailed {
                        message: e.user_message(FALLBACK_DELETE),
                    }
                }
            },
        }
    }
}
