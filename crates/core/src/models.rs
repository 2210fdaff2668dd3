//! Wire models for the connection statistics API.
//!
//! The backend serializes absent maps and slices as `null` and omits empty
//! optional fields, so every field here tolerates both.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Count per key, in key order.
pub type CountMap = BTreeMap<String, u64>;

/// One aggregated statistics snapshot from `GET /api/connections/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_connections: u64,
    pub avg_latency: f64,
    pub total_bytes_sent: u64,
    pub total_bytes_received: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub service_type_stats: CountMap,
    #[serde(deserialize_with = "null_as_default")]
    pub error_counts: CountMap,
    #[serde(deserialize_with = "null_as_default")]
    pub top_services: Vec<ServiceStats>,
    #[serde(deserialize_with = "null_as_default")]
    pub error_trends: Vec<ErrorTrend>,
    #[serde(deserialize_with = "null_as_default")]
    pub database_stats: CountMap,
    #[serde(deserialize_with = "null_as_default")]
    pub queue_stats: CountMap,
}

/// Per-service aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceStats {
    pub service_name: String,
    pub error_count: u64,
    pub avg_latency: f64,
    pub total_requests: u64,
}

/// Error count for one error type at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorTrend {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub error_type: String,
    #[serde(default)]
    pub count: u64,
}

/// One observed network connection event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionRecord {
    pub id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub source_ip: String,
    pub source_port: u16,
    pub dest_ip: String,
    pub dest_port: u16,
    pub protocol: String,
    pub service_name: String,
    pub service_type: String,
    pub host: String,
    pub deployment_id: String,
    pub environment: Option<String>,
    pub region: String,
    pub latency_ms: f64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub retry_count: u32,
    pub error: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

impl ConnectionRecord {
    /// Creates a record for the given service with every other field empty.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Self::default()
        }
    }

    /// Builder pattern: set error
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Builder pattern: set environment
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Builder pattern: set timestamp
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builder pattern: set source and destination endpoints
    #[must_use]
    pub fn with_endpoints(
        mut self,
        source: (impl Into<String>, u16),
        dest: (impl Into<String>, u16),
    ) -> Self {
        self.source_ip = source.0.into();
        self.source_port = source.1;
        self.dest_ip = dest.0.into();
        self.dest_port = dest.1;
        self
    }

    /// Service name, when the backend reported one.
    pub fn service(&self) -> Option<&str> {
        non_empty(&self.service_name)
    }

    /// Error kind, when the connection failed.
    pub fn error_kind(&self) -> Option<&str> {
        self.error.as_deref().and_then(non_empty)
    }

    /// Deployment environment, when known.
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref().and_then(non_empty)
    }

    pub fn source_endpoint(&self) -> String {
        format!("{}:{}", self.source_ip, self.source_port)
    }

    pub fn destination_endpoint(&self) -> String {
        format!("{}:{}", self.dest_ip, self.dest_port)
    }

    /// Bytes moved in both directions.
    pub const fn total_bytes(&self) -> u64 {
        self.bytes_sent.saturating_add(self.bytes_received)
    }
}

/// Envelope of `GET /api/connections`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub connections: Vec<ConnectionRecord>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_stats_decodes_backend_payload() {
        let json = r#"{
            "total_connections": 10,
            "error_counts": {"ETIMEDOUT": 3, "ECONNRESET": 1},
            "avg_latency": 12.5,
            "total_bytes_sent": 0,
            "total_bytes_received": 0,
            "top_services": null,
            "error_trends": [{"timestamp": "2024-03-01T10:15:00Z", "error_type": "ETIMEDOUT", "count": 2}],
            "service_type_stats": {"database": 4, "cache": 6},
            "database_stats": null,
            "queue_stats": {}
        }"#;

        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_connections, 10);
        assert_eq!(stats.error_counts.len(), 2);
        assert!(stats.top_services.is_empty());
        assert!(stats.database_stats.is_empty());
        assert_eq!(stats.error_trends.len(), 1);
        assert_eq!(stats.service_type_stats.get("cache"), Some(&6));
    }

    #[test]
    fn test_stats_tolerates_missing_fields() {
        let stats: Stats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_connections_response_null_list() {
        let response: ConnectionsResponse =
            serde_json::from_str(r#"{"connections": null}"#).unwrap();
        assert!(response.connections.is_empty());
    }

    #[test]
    fn test_connection_record_decodes_go_timestamp() {
        let json = r#"{
            "id": "c-1",
            "timestamp": "2024-03-01T10:15:30.123456789Z",
            "source_ip": "10.0.0.1",
            "source_port": 51234,
            "dest_ip": "10.0.0.9",
            "dest_port": 5432,
            "service_name": "orders-db",
            "environment": "prod",
            "latency_ms": 4.2,
            "error": "ECONNREFUSED",
            "tags": null,
            "metadata": {"ignored": true}
        }"#;

        let record: ConnectionRecord = serde_json::from_str(json).unwrap();
        assert!(record.timestamp.is_some());
        assert_eq!(record.error_kind(), Some("ECONNREFUSED"));
        assert_eq!(record.environment(), Some("prod"));
        assert_eq!(record.source_endpoint(), "10.0.0.1:51234");
        assert_eq!(record.destination_endpoint(), "10.0.0.9:5432");
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let record = ConnectionRecord::new("").with_error("").with_environment("");
        assert_eq!(record.service(), None);
        assert_eq!(record.error_kind(), None);
        assert_eq!(record.environment(), None);
    }
}
