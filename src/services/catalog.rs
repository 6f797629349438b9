use std::sync::{Arc, Mutex};

use anyhow::Context;
use async_trait::async_trait;
use rusqlite::Connection;
use serde_json::Value;

use crate::db::queries;

/// Source of the current event listing. Entries are raw JSON rows; shape
/// checking happens when they are matched.
#[async_trait]
pub trait EventCatalog: Send + Sync {
    async fn list_events(&self) -> anyhow::Result<Vec<Value>>;
}

/// Fetch the catalog, degrading to an empty one on failure.
pub async fn fetch_catalog(catalog: &dyn EventCatalog) -> Vec<Value> {
    match catalog.list_events().await {
        Ok(events) => events,
        Err(e) => {
            tracing::error!(error = %e, "listing events failed, continuing with empty catalog");
            Vec::new()
        }
    }
}

/// Events listing served over HTTP as a JSON array.
pub struct HttpCatalog {
    url: String,
    client: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EventCatalog for HttpCatalog {
    async fn list_events(&self) -> anyhow::Result<Vec<Value>> {
        let data: Value = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("failed to call events service")?
            .error_for_status()
            .context("events service returned error")?
            .json()
            .await
            .context("failed to parse events response")?;

        match data {
            Value::Array(events) => Ok(events),
            other => {
                tracing::warn!(response = %other, "events service did not return a list");
                Ok(Vec::new())
            }
        }
    }
}

/// The `events` table of a SQLite database shared with the events service.
pub struct SqliteCatalog {
    db: Arc<Mutex<Connection>>,
}

impl SqliteCatalog {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }
}

#[async_trait]
impl EventCatalog for SqliteCatalog {
    async fn list_events(&self) -> anyhow::Result<Vec<Value>> {
        let db = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("catalog connection lock poisoned"))?;
        queries::list_events(&db)
    }
}

/// Fixed in-memory listing.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    events: Vec<Value>,
}

impl StaticCatalog {
    pub fn new(events: Vec<Value>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl EventCatalog for StaticCatalog {
    async fn list_events(&self) -> anyhow::Result<Vec<Value>> {
        Ok(self.events.clone())
    }
}
