//! S3-backed [`ObjectStore`].

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;

use crate::{public_url, ObjectStore, StorageError};

/// Connection settings for the S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Static credentials. When unset the default AWS provider chain is used.
    pub access_key: Option<String>,
    pub access_secret: Option<String>,
}

/// Uploads objects `public-read` to one bucket.
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client from `config`.
    pub async fn connect(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(key), Some(secret)) = (&config.access_key, &config.access_secret) {
            let credentials = Credentials::new(key, secret, None, None, "library-env");
            loader = loader.credentials_provider(credentials);
        }

        let sdk_config = loader.load().await;
        Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        tracing::info!(bucket = %self.bucket, key, size, "Uploaded object");
        Ok(public_url(&self.bucket, key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        tracing::info!(bucket = %self.bucket, key, "Deleted object");
        Ok(())
    }
}
