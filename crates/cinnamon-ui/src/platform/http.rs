//! Backend reads over `fetch`.

use async_trait::async_trait;
use cinnamon_core::{
    ConnectionRecord, ConnectionsResponse, DashboardConfig, Error, Result, Stats, StatsSource,
};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

/// The two dashboard endpoints, resolved against the configured base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStatsSource {
    stats_url: String,
    connections_url: String,
}

impl HttpStatsSource {
    #[must_use]
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            stats_url: config.stats_url(),
            connections_url: config.connections_url(),
        }
    }

    #[must_use]
    pub fn stats_url(&self) -> &str {
        &self.stats_url
    }

    #[must_use]
    pub fn connections_url(&self) -> &str {
        &self.connections_url
    }
}

/// `GET url`, requiring a 2xx status and a JSON body of type `T`.
async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| Error::request_failed(url, e.to_string()))?;

    if !response.ok() {
        return Err(Error::UnexpectedStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| Error::decode_failed(url, e.to_string()))
}

#[async_trait(?Send)]
impl StatsSource for HttpStatsSource {
    async fn fetch_stats(&self) -> Result<Stats> {
        get_json(&self.stats_url).await
    }

    async fn fetch_connections(&self) -> Result<Vec<ConnectionRecord>> {
        get_json::<ConnectionsResponse>(&self.connections_url)
            .await
            .map(|body| body.connections)
    }
}
