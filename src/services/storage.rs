use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

/// Object-storage capability: write a byte stream under a key in the
/// configured bucket.
///
/// Deliberately policy-free. Filename sanitization, extension checks, and the
/// size limit all live in the upload handler; this trait only moves bytes.
/// Each call is stateless and independent; re-putting an existing key
/// overwrites it (last-write-wins).
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn put_object(&self, key: &str, data: Bytes) -> Result<()>;
}

/// S3-backed storage client.
pub struct S3StorageService {
    client: Client,
    bucket: String,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn put_object(&self, key: &str, data: Bytes) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await?;
        Ok(())
    }
}
