use crate::backend::{BoxError, IndexBackend};
use crate::document::IndexRequest;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};

/// Configuration for [`ElasticsearchBackend`].
///
/// Works against Elasticsearch and API-compatible stores (OpenSearch).
#[derive(Clone, Debug)]
pub struct ElasticsearchConfig {
    /// Base URL of the cluster, e.g. "http://localhost:9200".
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// HTTP implementation of [`IndexBackend`] against the Elasticsearch REST
/// API: `HEAD /{index}` for existence, `PUT /{index}` for creation and
/// `POST /_bulk` with NDJSON action/document pairs for delivery.
#[derive(Clone)]
pub struct ElasticsearchBackend {
    client: Client,
    config: ElasticsearchConfig,
}

impl ElasticsearchBackend {
    pub fn new(config: ElasticsearchConfig) -> Self {
        ElasticsearchBackend {
            client: Client::new(),
            config,
        }
    }

    fn index_url(&self, index: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), index)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.username {
            Some(user) => request.basic_auth(user, self.config.password.as_deref()),
            None => request,
        }
    }
}

#[async_trait]
impl IndexBackend for ElasticsearchBackend {
    async fn index_exists(&self, index: &str) -> Result<bool, BoxError> {
        let resp = self
            .authorize(self.client.head(self.index_url(index)))
            .send()
            .await?;

        match resp.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                Err(format!("existence check for \"{}\" failed with status {}", index, status).into())
            }
        }
    }

    async fn create_index(&self, index: &str) -> Result<bool, BoxError> {
        let resp = self
            .authorize(self.client.put(self.index_url(index)))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(format!("creating \"{}\" failed with status {}: {}", index, status, text).into());
        }

        let body: serde_json::Value = resp.json().await?;
        Ok(body.get("acknowledged").and_then(|v| v.as_bool()).unwrap_or(false))
    }

    async fn bulk(&self, requests: &[IndexRequest]) -> Result<(), BoxError> {
        let mut body = String::new();
        for request in requests {
            let action = serde_json::json!({
                "index": { "_index": request.index, "_type": request.doc_type }
            });
            body.push_str(&serde_json::to_string(&action)?);
            body.push('\n');
            body.push_str(&serde_json::to_string(&request.document)?);
            body.push('\n');
        }

        let url = format!("{}/_bulk", self.config.base_url.trim_end_matches('/'));
        let resp = self
            .authorize(self.client.post(&url))
            .header("Content-Type", "application/x-ndjson")
            .body(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(format!("bulk insert failed with status {}: {}", status, text).into());
        }

        // A 200 can still carry per-item failures.
        let summary: serde_json::Value = resp.json().await?;
        if summary.get("errors").and_then(|v| v.as_bool()).unwrap_or(false) {
            return Err(format!("bulk insert reported item errors: {}", summary).into());
        }

        Ok(())
    }
}
