use anyhow::{Context, Result};
use std::env;

/// Default upload size cap: 10 MiB
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";

/// Process-wide configuration, read once at startup and immutable afterwards.
///
/// Constructed in `main` and passed explicitly into the handlers and the
/// storage client so tests can substitute their own values.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// AWS region the bucket lives in (required)
    pub region: String,

    /// Target S3 bucket (required)
    pub bucket: String,

    /// Custom S3 endpoint for MinIO-style deployments (optional)
    pub endpoint_url: Option<String>,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Maximum accepted upload size in bytes
    pub max_file_size: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `AWS_REGION` and `BUCKET_NAME` are required; the process refuses to
    /// start without them. Everything else has a default.
    pub fn from_env() -> Result<Self> {
        let region = env::var("AWS_REGION").context("Missing environment variable: AWS_REGION")?;
        let bucket =
            env::var("BUCKET_NAME").context("Missing environment variable: BUCKET_NAME")?;

        Ok(Self {
            region,
            bucket,
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_FILE_SIZE),
        })
    }

    /// Public URL of an uploaded object. String composition only, no storage
    /// call is made here.
    pub fn object_url(&self, key: &str) -> String {
        match &self.endpoint_url {
            Some(endpoint) => {
                format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
            }
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}
