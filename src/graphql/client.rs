//! GraphQL Stats Client
//!
//! Posts the collection stats query to the configured endpoint and validates
//! the response envelope into a [`DatasetSnapshot`].

use crate::config::Config;
use crate::consts::cli_consts::source;
use crate::graphql::StatsSource;
use crate::graphql::error::FetchError;
use crate::model::{DatasetSnapshot, StatsData};
use log::{debug, warn};
use reqwest::{Client, ClientBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("chonk-stats/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
    api_key: String,
    query: String,
}

impl GraphqlClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .connect_timeout(source::connect_timeout())
            .timeout(source::request_timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            query: config.render_query(),
        })
    }

    async fn handle_response_status(response: Response) -> Result<Response, FetchError> {
        if !response.status().is_success() {
            return Err(FetchError::from_response(response).await);
        }
        Ok(response)
    }

    async fn post_query(&self) -> Result<Vec<u8>, FetchError> {
        let body = QueryBody { query: &self.query };
        let response = self
            .client
            .post(&self.endpoint)
            .header(source::API_KEY_HEADER, &self.api_key)
            .header("content-type", "application/json")
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Decode a GraphQL response envelope.
///
/// A body without `data` (or with `data: null`) is "no data", not an error.
/// GraphQL `errors` entries are logged and otherwise ignored.
pub fn decode_envelope(bytes: &[u8]) -> Result<Option<DatasetSnapshot>, FetchError> {
    let envelope: Value = serde_json::from_slice(bytes).map_err(FetchError::Decode)?;

    if let Some(errors) = envelope.get("errors") {
        match Vec::<GraphqlErrorEntry>::deserialize(errors) {
            Ok(entries) => {
                for entry in entries {
                    warn!("GraphQL error: {}", entry.message);
                }
            }
            Err(_) => warn!("GraphQL errors present: {}", errors),
        }
    }

    let data = match envelope.get("data") {
        None | Some(Value::Null) => {
            debug!("Response carried no data payload");
            return Ok(None);
        }
        Some(data) => data,
    };

    let wire = StatsData::deserialize(data).map_err(FetchError::Schema)?;
    Ok(Some(DatasetSnapshot::from_wire(wire)?))
}

#[async_trait::async_trait]
impl StatsSource for GraphqlClient {
    fn describe(&self) -> String {
        self.endpoint.clone()
    }

    async fn fetch_snapshot(&self) -> Result<Option<DatasetSnapshot>, FetchError> {
        let bytes = self.post_query().await?;
        decode_envelope(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HolderRecord, TimeSeriesPoint};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const FULL_BODY: &str = r#"{
        "data": {
            "dailyChonkTransfers": { "items": [
                { "id": "1000", "totalTransfers": 5 },
                { "id": "2000", "totalTransfers": 9 }
            ]},
            "topChonkHolders": { "items": [
                { "id": "0xA", "totalChonks": 1000000 }
            ]},
            "dailyChonkTraitTransfers": { "items": [
                { "id": "1000", "totalTraitsTransfers": 2 }
            ]}
        }
    }"#;

    #[test]
    fn test_decode_full_envelope() {
        let snapshot = decode_envelope(FULL_BODY.as_bytes()).unwrap().unwrap();
        assert_eq!(
            snapshot.daily_transfers,
            vec![TimeSeriesPoint::new(1000, 5), TimeSeriesPoint::new(2000, 9)]
        );
        assert_eq!(snapshot.top_holders, vec![HolderRecord::new("0xA", 1_000_000)]);
        assert_eq!(snapshot.daily_trait_transfers.len(), 1);
    }

    #[test]
    // Missing, null or non-object payloads all mean "no data".
    fn test_decode_without_data_is_empty() {
        assert!(decode_envelope(br#"{}"#).unwrap().is_none());
        assert!(decode_envelope(br#"{"data": null}"#).unwrap().is_none());
        assert!(decode_envelope(br#"[]"#).unwrap().is_none());
        assert!(
            decode_envelope(br#"{"errors": [{"message": "boom"}]}"#)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode_envelope(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let err = decode_envelope(br#"{"data": {"dailyChonkTransfers": 3}}"#).unwrap_err();
        assert!(matches!(err, FetchError::Schema(_)));
    }

    #[test]
    fn test_decode_rejects_invalid_epoch() {
        let body = FULL_BODY.replace("\"2000\"", "\"soon\"");
        let err = decode_envelope(body.as_bytes()).unwrap_err();
        assert!(matches!(err, FetchError::Invalid(_)));
    }

    /// Serve a single HTTP response and hand back the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let lower = line.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        (format!("http://{}/graphql", addr), handle)
    }

    #[tokio::test]
    // The client should POST the rendered query with both headers.
    async fn test_fetch_snapshot_sends_query_and_headers() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", FULL_BODY).await;
        let config = Config::new(url, "test-key".to_string());
        let client = GraphqlClient::new(&config).unwrap();

        let snapshot = client.fetch_snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot.daily_transfers.len(), 2);

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /graphql"));
        assert!(lower.contains("x-ghost-key: test-key"));
        assert!(lower.contains("content-type: application/json"));
        assert!(request.contains("topChonkHolders"));
        assert!(request.contains("limit: 20"));
    }

    #[tokio::test]
    async fn test_fetch_snapshot_maps_http_errors() {
        let (url, server) = serve_once("HTTP/1.1 403 Forbidden", r#"{"error":"bad key"}"#).await;
        let client = GraphqlClient::new(&Config::new(url, "wrong".to_string())).unwrap();

        let err = client.fetch_snapshot().await.unwrap_err();
        match err {
            FetchError::Http { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("bad key"));
            }
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_snapshot_transport_failure() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = Config::new(format!("http://{}/graphql", addr), "k".to_string());
        let client = GraphqlClient::new(&config).unwrap();
        let err = client.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, FetchError::Reqwest(_)));
    }
}
