// ── Items backend seam ──
//
// The dispatcher talks to this trait, not to `ItemsClient` directly, so
// tests can run the whole item manager against an in-memory store.

use std::future::Future;

use stockroom_api::ItemsClient;
use stockroom_api::types::ItemRequest;

use crate::command::ItemPayload;
use crate::error::CoreError;
use crate::model::{Item, ItemId, Page};

/// Async access to the items resource.
pub trait ItemsApi: Send + Sync + 'static {
    fn list(
        &self,
        offset: u64,
        limit: u32,
    ) -> impl Future<Output = Result<Page, CoreError>> + Send;

    fn get(&self, id: &ItemId) -> impl Future<Output = Result<Item, CoreError>> + Send;

    /// Success is decided by status; `None` when the server did not echo
    /// a readable item back.
    fn create(
        &self,
        payload: &ItemPayload,
    ) -> impl Future<Output = Result<Option<Item>, CoreError>> + Send;

    fn update(
        &self,
        id: &ItemId,
        payload: &ItemPayload,
    ) -> impl Future<Output = Result<Option<Item>, CoreError>> + Send;

    fn delete(&self, id: &ItemId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

impl ItemsApi for ItemsClient {
    async fn list(&self, offset: u64, limit: u32) -> Result<Page, CoreError> {
        let raw = self.list_items(limit, offset).await?;
        Ok(Page::from_response(raw, offset, limit))
    }

    async fn get(&self, id: &ItemId) -> Result<Item, CoreError> {
        Ok(self.get_item(&id.to_string()).await?.into())
    }

    async fn create(&self, payload: &ItemPayload) -> Result<Option<Item>, CoreError> {
        let created = self.create_item(&ItemRequest::from(payload)).await?;
        Ok(created.map(Item::from))
    }

    async fn update(&self, id: &ItemId, payload: &ItemPayload) -> Result<Option<Item>, CoreError> {
        let updated = self
            .update_item(&id.to_string(), &ItemRequest::from(payload))
            .await?;
        Ok(updated.map(Item::from))
    }

    async fn delete(&self, id: &ItemId) -> Result<(), CoreError> {
        Ok(self.delete_item(&id.to_string()).await?)
    }
}
