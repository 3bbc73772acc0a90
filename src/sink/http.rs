use reqwest::Client;

use crate::config::Config;
use crate::error::SinkError;
use crate::sink::ObjectSink;

/// Plain HTTP PUT against an object-store endpoint (`{endpoint}/{bucket}/{path}`).
#[derive(Debug, Clone)]
pub struct HttpObjectSink {
    client: Client,
    endpoint: String,
    bucket: String,
    token: Option<String>,
}

impl HttpObjectSink {
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            token,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, SinkError> {
        let endpoint = config
            .sink_endpoint
            .as_ref()
            .ok_or(SinkError::NotConfigured("SINK_ENDPOINT"))?;
        let bucket = config
            .sink_bucket
            .as_ref()
            .ok_or(SinkError::NotConfigured("SINK_BUCKET"))?;
        Ok(Self::new(endpoint.clone(), bucket.clone(), config.sink_token.clone()))
    }

    pub fn object_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, path)
    }
}

impl ObjectSink for HttpObjectSink {
    async fn put(&self, path: &str, body: Vec<u8>) -> Result<(), SinkError> {
        let mut request = self
            .client
            .put(self.object_url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SinkError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SinkError::Status(status.as_u16(), text));
        }
        Ok(())
    }
}
