//! Where a live view gets its full collection from.

use async_trait::async_trait;

use crate::adapters::realtime::RealtimeError;
use crate::domain::realtime::Entity;

/// Full re-fetch of one collection.
#[async_trait]
pub trait CollectionSource<T: Entity>: Send + Sync {
    async fn fetch(&self) -> Result<Vec<T>, RealtimeError>;
}

/// Fetches a collection from the REST API, e.g. `GET {base}/api/leads`.
#[derive(Debug, Clone)]
pub struct HttpCollectionSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCollectionSource {
    pub fn new(base_url: &str, path: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, path)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, path: &str) -> Self {
        Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), path),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<T: Entity> CollectionSource<T> for HttpCollectionSource {
    async fn fetch(&self) -> Result<Vec<T>, RealtimeError> {
        let items = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<T>>()
            .await?;
        tracing::debug!(url = %self.url, count = items.len(), "collection fetched");
        Ok(items)
    }
}
