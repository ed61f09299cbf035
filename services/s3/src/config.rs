use crate::constants::*;
use crate::Credential;
use log::debug;
use serde::Deserialize;
use sharesign_core::utils::Redact;
use sharesign_core::{Context, Error, Result};
use std::fmt::{Debug, Formatter};

/// Config carries all the settings needed to share a buffer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// `endpoint` of the S3 compatible API, like `https://s3.example.com`.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SHARE_TO_S3_ENDPOINT`]
    /// - settings key: `s3_endpoint`
    pub endpoint: Option<String>,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SHARE_TO_S3_ACCESS_KEY`]
    /// - settings key: `s3_username`
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SHARE_TO_S3_SECRET_KEY`]
    /// - settings key: `s3_password`
    pub secret_access_key: Option<String>,
    /// `url_prefix` is the public base url objects are served from.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SHARE_TO_S3_URL_PREFIX`]
    /// - settings key: `s3_url_prefix`
    pub url_prefix: Option<String>,
    /// `bucket` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SHARE_TO_S3_BUCKET`]
    /// - settings key: `s3_bucket`
    /// - default to `uploads`
    pub bucket: Option<String>,
    /// `region` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SHARE_TO_S3_REGION`]
    /// - settings key: `s3_region`
    /// - default to `global`
    pub region: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("url_prefix", &self.url_prefix)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .finish()
    }
}

/// Settings document as written by users.
#[derive(Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    s3_endpoint: Option<String>,
    s3_username: Option<String>,
    s3_password: Option<String>,
    s3_url_prefix: Option<String>,
    s3_bucket: Option<String>,
    s3_region: Option<String>,
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(SHARE_TO_S3_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SHARE_TO_S3_ACCESS_KEY) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SHARE_TO_S3_SECRET_KEY) {
            self.secret_access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SHARE_TO_S3_URL_PREFIX) {
            self.url_prefix.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SHARE_TO_S3_BUCKET) {
            self.bucket.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SHARE_TO_S3_REGION) {
            self.region.get_or_insert(v);
        }

        self
    }

    /// Load config from a JSON settings file.
    ///
    /// Fields already set are kept. `~` in path is expanded with the home dir
    /// of the context.
    pub async fn from_file(mut self, ctx: &Context, path: &str) -> Result<Self> {
        let path = ctx.expand_home_dir(path).ok_or_else(|| {
            Error::config_invalid(format!("can't expand home dir in settings path {path}"))
        })?;
        let content = ctx.file_read(&path).await?;
        let settings: SettingsFile = serde_json::from_slice(&content).map_err(|e| {
            Error::config_invalid(format!("settings file {path} is malformed")).with_source(e)
        })?;
        debug!("loaded settings from {path}");

        let SettingsFile {
            s3_endpoint,
            s3_username,
            s3_password,
            s3_url_prefix,
            s3_bucket,
            s3_region,
        } = settings;
        fill(&mut self.endpoint, s3_endpoint);
        fill(&mut self.access_key_id, s3_username);
        fill(&mut self.secret_access_key, s3_password);
        fill(&mut self.url_prefix, s3_url_prefix);
        fill(&mut self.bucket, s3_bucket);
        fill(&mut self.region, s3_region);

        Ok(self)
    }

    /// Check that every required setting is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("endpoint", &self.endpoint),
            ("access key", &self.access_key_id),
            ("secret key", &self.secret_access_key),
            ("url prefix", &self.url_prefix),
        ];
        let missing = required
            .iter()
            .filter(|(_, v)| v.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| *name)
            .collect::<Vec<_>>();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::config_invalid(format!(
                "missing settings: {}",
                missing.join(", ")
            )))
        }
    }

    /// Endpoint without trailing `/`.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    /// Public url prefix without trailing `/`.
    pub fn url_prefix(&self) -> &str {
        self.url_prefix.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    /// Bucket, default to `uploads`.
    pub fn bucket(&self) -> &str {
        match self.bucket.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => DEFAULT_BUCKET,
        }
    }

    /// Region, default to `global`.
    pub fn region(&self) -> &str {
        match self.region.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => DEFAULT_REGION,
        }
    }

    /// Credential for the signer.
    pub fn credential(&self) -> Credential {
        Credential::new(
            self.access_key_id.clone().unwrap_or_default(),
            self.secret_access_key.clone().unwrap_or_default(),
        )
    }
}

fn fill(field: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        field.get_or_insert(v);
    }
}
