use std::time::Duration;

/// Positional tolerance for track simplification, in degrees.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.00001;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_file_size: usize,
    pub cache_ttl: Duration,
    pub simplify_tolerance: f64,
    pub sink_endpoint: Option<String>,
    pub sink_bucket: Option<String>,
    pub sink_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let max_file_size_mb = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(25);

        let cache_ttl_seconds = std::env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        let simplify_tolerance = std::env::var("SIMPLIFY_TOLERANCE")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|t| t.is_finite() && *t >= 0.0)
            .unwrap_or(DEFAULT_SIMPLIFY_TOLERANCE);

        Self {
            port,
            max_file_size: max_file_size_mb * 1024 * 1024,
            cache_ttl: Duration::from_secs(cache_ttl_seconds),
            simplify_tolerance,
            sink_endpoint: non_empty_env("SINK_ENDPOINT"),
            sink_bucket: non_empty_env("SINK_BUCKET"),
            sink_token: non_empty_env("SINK_TOKEN"),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
