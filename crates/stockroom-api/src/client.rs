// Async HTTP client for the items REST API.
//
// Base path: configurable, `/api/` by default
// Auth: none

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::types::{ItemListResponse, ItemRequest, ItemResponse};

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the items API.
///
/// All paths are resolved relative to the base URL, so
/// `http://host:8000/api` and `http://host:8000/api/` behave the same.
#[derive(Debug, Clone)]
pub struct ItemsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ItemsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &crate::TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and force a trailing slash so `join` appends
    /// instead of replacing the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a path onto the base URL. Relative paths (`"items"`) land under
    /// the API base; absolute ones (`"/health"`) land on the server origin.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// `items/{id}` with the id as one percent-encoded path segment, so
    /// ids containing `/`, `?` or `#` stay inside the segment.
    fn item_url(&self, id: &str) -> Result<Url, Error> {
        let mut url = self.url("items")?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Option<T>, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_accepted(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Option<T>, Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_accepted(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    /// Mutations succeed on status alone. The echoed entity is a bonus:
    /// an empty or foreign body yields `Ok(None)`, not an error.
    async fn handle_accepted<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }

        let body = resp.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&body) {
            Ok(entity) => Ok(Some(entity)),
            Err(e) => {
                debug!(%status, error = %e, "ignoring unparseable success body");
                Ok(None)
            }
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    /// The items API reports errors as plain text (`http.Error` style,
    /// with a trailing newline), so the body is the message.
    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        Error::Status {
            status: status.as_u16(),
            body: raw.trim().to_owned(),
        }
    }

    // ── Items ────────────────────────────────────────────────────────

    /// `GET items?limit=&offset=`
    pub async fn list_items(&self, limit: u32, offset: u64) -> Result<ItemListResponse, Error> {
        self.get_with_params(
            self.url("items")?,
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    /// `GET items/{id}`
    pub async fn get_item(&self, id: &str) -> Result<ItemResponse, Error> {
        self.get(self.item_url(id)?).await
    }

    /// `POST items`. `None` when the server accepted the item but did
    /// not echo a readable copy back.
    pub async fn create_item(&self, body: &ItemRequest) -> Result<Option<ItemResponse>, Error> {
        self.post(self.url("items")?, body).await
    }

    /// `PUT items/{id}`. `None` as for [`Self::create_item`].
    pub async fn update_item(
        &self,
        id: &str,
        body: &ItemRequest,
    ) -> Result<Option<ItemResponse>, Error> {
        self.put(self.item_url(id)?, body).await
    }

    /// `DELETE items/{id}` (the server answers 204 with no body)
    pub async fn delete_item(&self, id: &str) -> Result<(), Error> {
        self.delete(self.item_url(id)?).await
    }

    // ── Health ───────────────────────────────────────────────────────

    /// `GET /health` or `GET /health/ready` on the server origin.
    ///
    /// Returns the plain-text body (`"OK"` / `"Ready"` on the reference server).
    pub async fn health(&self, ready: bool) -> Result<String, Error> {
        let url = self.url(if ready { "/health/ready" } else { "/health" })?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp.text().await?.trim().to_owned())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }
}
