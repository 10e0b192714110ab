use crate::config::AppConfig;
use crate::services::storage::S3StorageService;
use aws_sdk_s3::config::Region;
use std::sync::Arc;
use tracing::info;

/// Builds the S3 client from the startup configuration.
///
/// Credentials come from the default AWS provider chain (env vars, profile,
/// instance metadata). A custom endpoint switches the client to path-style
/// addressing for MinIO-compatible deployments.
pub async fn setup_storage(config: &AppConfig) -> Arc<S3StorageService> {
    info!(
        "☁️  S3 Storage: bucket '{}' in region '{}'",
        config.bucket, config.region
    );

    let mut loader = aws_config::from_env().region(Region::new(config.region.clone()));
    if let Some(endpoint) = &config.endpoint_url {
        info!("☁️  Using custom S3 endpoint: {}", endpoint);
        loader = loader.endpoint_url(endpoint.clone());
    }
    let aws_config = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&aws_config);
    if config.endpoint_url.is_some() {
        builder = builder.force_path_style(true);
    }

    let s3_client = aws_sdk_s3::Client::from_conf(builder.build());
    Arc::new(S3StorageService::new(s3_client, config.bucket.clone()))
}
