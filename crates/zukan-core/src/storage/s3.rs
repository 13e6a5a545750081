//! S3-compatible media store configuration and client.

use std::env;

use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream, Client};
use aws_types::region::Region;

use crate::{Error, Result};

use super::{media_object_key, MediaStore};

const ENV_ENDPOINT_URL: &str = "ZUKAN_S3_ENDPOINT_URL";
const ENV_REGION: &str = "ZUKAN_S3_REGION";
const ENV_BUCKET: &str = "ZUKAN_S3_BUCKET";
const ENV_ACCESS_KEY_ID: &str = "ZUKAN_S3_ACCESS_KEY_ID";
const ENV_SECRET_ACCESS_KEY: &str = "ZUKAN_S3_SECRET_ACCESS_KEY";
const ENV_PUBLIC_BASE_URL: &str = "ZUKAN_S3_PUBLIC_BASE_URL";

/// S3-compatible storage configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct S3Config {
    /// Endpoint URL of the S3-compatible service.
    pub endpoint_url: String,
    /// Region name; S3-compatible vendors often accept `auto`.
    pub region: String,
    /// Bucket holding all media objects.
    pub bucket: String,
    /// Access key id for S3-compatible auth.
    pub access_key_id: String,
    /// Secret access key for S3-compatible auth.
    pub secret_access_key: String,
    /// Public URL base for serving media.
    pub public_base_url: String,
}

impl S3Config {
    /// Load storage configuration from environment variables.
    ///
    /// Returns `Ok(None)` when no storage variables are set.
    /// Returns an error when only a partial configuration is provided.
    pub fn from_env() -> Result<Option<Self>> {
        parse_config(|key| env::var(key).ok())
    }
}

/// S3-backed media store.
#[derive(Clone, Debug)]
pub struct S3MediaStore {
    config: S3Config,
    client: Client,
}

impl S3MediaStore {
    #[must_use]
    pub fn new(config: S3Config) -> Self {
        let client = build_s3_client(&config);
        Self { config, client }
    }

    #[must_use]
    pub const fn config(&self) -> &S3Config {
        &self.config
    }

    /// Check that the configured bucket is reachable with current credentials.
    pub async fn bucket_is_reachable(&self) -> Result<()> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|error| storage_error("head_bucket", &self.config.bucket, None, error))?;
        Ok(())
    }
}

impl MediaStore for S3MediaStore {
    async fn resolve_url(&self, identity: &str, key: &str) -> Result<String> {
        let object_key = media_object_key(identity, key)?;
        Ok(format!(
            "{}/{object_key}",
            self.config.public_base_url.trim_end_matches('/')
        ))
    }

    async fn upload(
        &self,
        identity: &str,
        key: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<()> {
        let object_key = media_object_key(identity, key)?;

        let mut request = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&object_key)
            .body(ByteStream::from(bytes.to_vec()));

        if let Some(content_type) = normalize_content_type(content_type) {
            request = request.content_type(content_type);
        }

        request.send().await.map_err(|error| {
            storage_error("put_object", &self.config.bucket, Some(&object_key), error)
        })?;

        Ok(())
    }
}

fn parse_config(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<S3Config>> {
    let endpoint_url = lookup(ENV_ENDPOINT_URL).map(|value| value.trim().to_string());
    let region = lookup(ENV_REGION).map(|value| value.trim().to_string());
    let bucket = lookup(ENV_BUCKET).map(|value| value.trim().to_string());
    let access_key_id = lookup(ENV_ACCESS_KEY_ID).map(|value| value.trim().to_string());
    let secret_access_key = lookup(ENV_SECRET_ACCESS_KEY).map(|value| value.trim().to_string());
    let public_base_url = lookup(ENV_PUBLIC_BASE_URL).map(|value| value.trim().to_string());

    let any_present = endpoint_url.is_some()
        || bucket.is_some()
        || access_key_id.is_some()
        || secret_access_key.is_some()
        || public_base_url.is_some();

    if !any_present {
        return Ok(None);
    }

    let mut missing = Vec::new();
    if endpoint_url.as_ref().map_or(true, String::is_empty) {
        missing.push(ENV_ENDPOINT_URL);
    }
    if bucket.as_ref().map_or(true, String::is_empty) {
        missing.push(ENV_BUCKET);
    }
    if access_key_id.as_ref().map_or(true, String::is_empty) {
        missing.push(ENV_ACCESS_KEY_ID);
    }
    if secret_access_key.as_ref().map_or(true, String::is_empty) {
        missing.push(ENV_SECRET_ACCESS_KEY);
    }
    if public_base_url.as_ref().map_or(true, String::is_empty) {
        missing.push(ENV_PUBLIC_BASE_URL);
    }

    if !missing.is_empty() {
        return Err(Error::InvalidInput(format!(
            "S3 storage configuration is incomplete. Missing: {}",
            missing.join(", ")
        )));
    }

    let endpoint_url = require_http_url(endpoint_url, ENV_ENDPOINT_URL)?;
    let public_base_url = require_http_url(public_base_url, ENV_PUBLIC_BASE_URL)?;

    Ok(Some(S3Config {
        endpoint_url,
        region: region.filter(|value| !value.is_empty()).unwrap_or_else(|| "auto".to_string()),
        bucket: bucket.expect("validated above"),
        access_key_id: access_key_id.expect("validated above"),
        secret_access_key: secret_access_key.expect("validated above"),
        public_base_url,
    }))
}

fn build_s3_client(config: &S3Config) -> Client {
    let credentials = Credentials::new(
        config.access_key_id.clone(),
        config.secret_access_key.clone(),
        None,
        None,
        "zukan-core-s3-storage",
    );

    let sdk_config = aws_sdk_s3::config::Builder::new()
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(config.endpoint_url.clone())
        .force_path_style(true)
        .build();

    Client::from_conf(sdk_config)
}

fn storage_error(
    operation: &str,
    bucket: &str,
    object_key: Option<&str>,
    error: impl std::fmt::Display,
) -> Error {
    let target = object_key.map_or_else(|| bucket.to_string(), |key| format!("{bucket}/{key}"));
    Error::Storage(format!("S3 {operation} failed for {target}: {error}"))
}

fn normalize_content_type(content_type: Option<&str>) -> Option<String> {
    content_type
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn require_http_url(value: Option<String>, name: &str) -> Result<String> {
    let value = value.expect("validated above");
    if !crate::util::is_http_url(&value) {
        return Err(Error::InvalidInput(format!(
            "{name} must start with http:// or https://"
        )));
    }
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::storage::MediaStore as _;

    fn parse_from_map(map: &HashMap<&str, &str>) -> Result<Option<S3Config>> {
        parse_config(|key| map.get(key).map(|value| (*value).to_string()))
    }

    fn full_map() -> HashMap<&'static str, &'static str> {
        let mut map = HashMap::new();
        map.insert(ENV_ENDPOINT_URL, "https://s3.example.com");
        map.insert(ENV_BUCKET, "zukan-media");
        map.insert(ENV_ACCESS_KEY_ID, "AKID123");
        map.insert(ENV_SECRET_ACCESS_KEY, "SECRET123");
        map.insert(ENV_PUBLIC_BASE_URL, "https://cdn.example.com/");
        map
    }

    #[test]
    fn parse_config_none_returns_none() {
        let map = HashMap::new();
        assert!(parse_from_map(&map).unwrap().is_none());
    }

    #[test]
    fn parse_config_requires_all_required_values() {
        let mut map = HashMap::new();
        map.insert(ENV_ENDPOINT_URL, "https://s3.example.com");
        map.insert(ENV_BUCKET, "zukan-media");

        let err = parse_from_map(&map).unwrap_err();
        match err {
            Error::InvalidInput(message) => {
                assert!(message.contains(ENV_ACCESS_KEY_ID));
                assert!(message.contains(ENV_SECRET_ACCESS_KEY));
                assert!(message.contains(ENV_PUBLIC_BASE_URL));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_config_accepts_valid_values_and_defaults_region() {
        let config = parse_from_map(&full_map()).unwrap().unwrap();
        assert_eq!(config.region, "auto");
        assert_eq!(config.public_base_url, "https://cdn.example.com");
    }

    #[test]
    fn parse_config_rejects_non_http_public_base_url() {
        let mut map = full_map();
        map.insert(ENV_PUBLIC_BASE_URL, "cdn.example.com");

        let err = parse_from_map(&map).unwrap_err();
        match err {
            Error::InvalidInput(message) => {
                assert!(message.contains(ENV_PUBLIC_BASE_URL));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolve_url_joins_public_base_and_object_key() {
        let config = parse_from_map(&full_map()).unwrap().unwrap();
        let store = S3MediaStore::new(config);

        let url = store
            .resolve_url("identity-1", "ponita0077.svg")
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example.com/media/identity-1/ponita0077.svg");
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ignore = "Requires ZUKAN_S3_* env vars plus network access"]
    async fn s3_bucket_exists_and_is_reachable() {
        let _ = dotenvy::dotenv();

        let config = S3Config::from_env()
            .expect("S3 env parsing should not error")
            .expect("S3 config should be present");
        let store = S3MediaStore::new(config.clone());

        store.bucket_is_reachable().await.unwrap_or_else(|error| {
            panic!(
                "S3 bucket health check failed for bucket '{}': {error}",
                config.bucket
            )
        });
    }
}
