#[cfg(feature = "lambda")]
use crate::core::ConfigProvider;
#[cfg(feature = "lambda")]
use crate::utils::error::{DirectoryError, Result};
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub seed_bucket: Option<String>,
    pub seed_key: String,
    pub s3_region: String,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            endpoint: env::var("DIRECTORY_ENDPOINT").ok(),
            api_key: env::var("DIRECTORY_API_KEY").ok(),
            seed_bucket: env::var("SEED_BUCKET").ok(),
            seed_key: env::var("SEED_KEY").unwrap_or_else(|_| "seed/companies.csv".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "us-west-2".to_string()),
        };

        // 沒有 REST 端點時必須有種子 bucket
        if config.endpoint.is_none() && config.seed_bucket.is_none() {
            return Err(DirectoryError::ConfigError {
                message: "Either DIRECTORY_ENDPOINT or SEED_BUCKET environment variable is required"
                    .to_string(),
            });
        }

        Ok(config)
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or("")
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|raw| raw.parse().ok())
    }
}

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        use crate::utils::validation::*;

        // 驗證 REST 端點
        if let Some(endpoint) = &self.endpoint {
            validate_url("endpoint", endpoint)?;
        }

        // 驗證種子來源
        if let Some(bucket) = &self.seed_bucket {
            validate_s3_bucket_name("seed_bucket", bucket)?;
        }
        validate_non_empty_string("seed_key", &self.seed_key)?;

        // 驗證區域
        validate_aws_region("s3_region", &self.s3_region)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> crate::utils::error::Result<()> {
    if bucket_name.is_empty() {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot be empty".to_string(),
        });
    }

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

#[cfg(feature = "lambda")]
fn validate_aws_region(field_name: &str, region: &str) -> crate::utils::error::Result<()> {
    use crate::utils::validation::validate_non_empty_string;

    validate_non_empty_string(field_name, region)?;

    // AWS region format validation
    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3SeedStore {
    client: S3Client,
    bucket: String,
}

#[cfg(feature = "lambda")]
impl S3SeedStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// 從 S3 下載種子 CSV
    pub async fn fetch_seed(&self, key: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| DirectoryError::SeedError {
                message: format!("Failed to read seed from S3: {}", e),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| DirectoryError::SeedError {
                message: format!("Failed to collect seed data: {}", e),
            })?;

        Ok(data.into_bytes().to_vec())
    }
}
