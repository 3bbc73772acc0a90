mod http;

pub use http::HttpObjectSink;

use uuid::Uuid;

use crate::error::SinkError;
use crate::types::analysis::TimeseriesPayload;

/// Source of object keys for stored time series.
pub trait KeyGenerator: Send + Sync {
    fn next_key(&self) -> String;
}

pub struct UuidKeyGenerator;

impl KeyGenerator for UuidKeyGenerator {
    fn next_key(&self) -> String {
        format!("timeseries/{}.json", Uuid::new_v4())
    }
}

/// Somewhere a serialized payload can be written under a path.
#[allow(async_fn_in_trait)]
pub trait ObjectSink {
    async fn put(&self, path: &str, body: Vec<u8>) -> Result<(), SinkError>;
}

/// Objects live beneath a per-identity prefix.
pub fn object_path(identity: &str, key: &str) -> String {
    format!("private/{}/{}", identity, key)
}

/// Serializes and writes the payload, returning the full object path.
pub async fn upload_payload<S: ObjectSink>(
    sink: &S,
    identity: &str,
    key: &str,
    payload: &TimeseriesPayload,
) -> Result<String, SinkError> {
    let body = serde_json::to_vec(payload).map_err(|e| SinkError::Serialize(e.to_string()))?;
    let path = object_path(identity, key);

    tracing::info!("Uploading {} bytes to {}", body.len(), path);
    sink.put(&path, body).await?;
    tracing::info!("Object uploaded successfully");

    Ok(path)
}
