//! Upload workflow that shares a text buffer to an S3 compatible store.

use crate::constants::{AWS_URI_ENCODE_SET, NOTICE_PREFIX};
use crate::{Config, RequestSigner};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::TimeZone;
use http::{Method, StatusCode};
use log::{debug, warn};
use percent_encoding::utf8_percent_encode;
use sharesign_core::{Context, Error, ErrorKind, Result};
use std::fmt::Debug;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Message shown to the user by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Transient status, like a status bar message.
    Status(String),
    /// Failure the user must see, like an error dialog.
    Error(String),
}

/// Host is the capability set the workflow needs from the editor it runs in.
///
/// The workflow never touches a concrete editor; anything that can hand out
/// settings and buffer text and show messages can drive it.
#[async_trait]
pub trait Host: Debug + Send + Sync + 'static {
    /// Load the share settings.
    async fn secrets(&self) -> Result<Config>;

    /// Text of the buffer to share.
    async fn buffer_content(&self) -> Result<Bytes>;

    /// Show a message to the user.
    fn notify(&self, notice: Notice);

    /// Ask the user for an object name, pre-filled with `default`.
    ///
    /// Returns `None` if the user cancelled.
    async fn prompt_filename(&self, default: &str) -> Option<String>;

    /// Put text on the clipboard.
    fn set_clipboard(&self, text: &str);
}

/// Default object name for given time: `2024-01-15_12-00-00.txt`.
pub fn default_object_name<Tz: TimeZone>(time: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%Y-%m-%d_%H-%M-%S.txt").to_string()
}

/// Normalize a user supplied object name.
///
/// Surrounding whitespace is trimmed. Returns `None` for blank input, appends
/// `.txt` when missing.
pub fn normalize_object_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    if name.ends_with(".txt") {
        Some(name.to_string())
    } else {
        Some(format!("{name}.txt"))
    }
}

/// Url the object is uploaded to: `{endpoint}/{bucket}/{key}`.
pub fn object_url(cfg: &Config, key: &str) -> String {
    format!("{}/{}/{}", cfg.endpoint(), cfg.bucket(), encode_key(key))
}

/// Url the object is served from: `{url_prefix}/{bucket}/{key}`.
pub fn public_url(cfg: &Config, key: &str) -> String {
    format!("{}/{}/{}", cfg.url_prefix(), cfg.bucket(), encode_key(key))
}

fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, &AWS_URI_ENCODE_SET).to_string()
}

/// Whether the buffer holds nothing but whitespace.
///
/// Whitespace follows the Unicode `White_Space` property, so `\u{0b}`, NBSP and
/// the ideographic space count as blank. Invalid utf-8 is never blank.
fn is_blank(content: &[u8]) -> bool {
    std::str::from_utf8(content).is_ok_and(|s| s.trim().is_empty())
}

/// Text shown to the user for given error.
pub fn error_notice(err: &Error) -> String {
    match err.kind() {
        ErrorKind::ConfigInvalid => format!(
            "{NOTICE_PREFIX}: Please configure S3 settings ({})",
            err.message()
        ),
        _ => format!("{NOTICE_PREFIX}: {}", err.message()),
    }
}

/// Uploader drives the share commands against a [`Host`].
///
/// Cloning is cheap; every upload runs on its own tokio task.
#[derive(Debug, Clone)]
pub struct Uploader {
    ctx: Context,
    host: Arc<dyn Host>,
}

impl Uploader {
    /// Create a new uploader.
    ///
    /// `ctx` must carry an `HttpSend` implementation.
    pub fn new(ctx: Context, host: impl Host) -> Self {
        Self {
            ctx,
            host: Arc::new(host),
        }
    }

    /// Share the buffer under a timestamped name.
    ///
    /// The upload runs in the background; await the handle for its public url.
    pub async fn share(&self) -> Result<JoinHandle<Result<String>>> {
        let (cfg, content) = self.prepare().await?;
        let key = default_object_name(&chrono::Local::now());
        Ok(self.spawn(cfg, key, content))
    }

    /// Share the buffer under a name picked by the user.
    ///
    /// Returns `Ok(None)` if the user cancelled the prompt.
    pub async fn share_with_custom_name(&self) -> Result<Option<JoinHandle<Result<String>>>> {
        let (cfg, content) = self.prepare().await?;
        let default = default_object_name(&chrono::Local::now());

        let Some(key) = self
            .host
            .prompt_filename(&default)
            .await
            .as_deref()
            .and_then(normalize_object_name)
        else {
            debug!("filename prompt cancelled");
            return Ok(None);
        };

        Ok(Some(self.spawn(cfg, key, content)))
    }

    /// Run the upload on a tokio task.
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn(&self, cfg: Config, key: String, content: Bytes) -> JoinHandle<Result<String>> {
        self.host
            .notify(Notice::Status(format!("{NOTICE_PREFIX}: Uploading...")));

        let this = self.clone();
        tokio::spawn(async move { this.upload(&cfg, &key, content).await })
    }

    /// Upload and report the outcome to the host.
    ///
    /// On success the public url is copied to the clipboard and returned.
    pub async fn upload(&self, cfg: &Config, key: &str, content: Bytes) -> Result<String> {
        match self.put_object(cfg, key, content).await {
            Ok(url) => {
                self.host.set_clipboard(&url);
                self.host.notify(Notice::Status(format!(
                    "{NOTICE_PREFIX}: Uploaded and copied URL to clipboard"
                )));
                Ok(url)
            }
            Err(err) => Err(self.report(err)),
        }
    }

    async fn prepare(&self) -> Result<(Config, Bytes)> {
        let cfg = self.host.secrets().await.map_err(|e| self.report(e))?;
        cfg.validate().map_err(|e| self.report(e))?;

        let content = self.host.buffer_content().await.map_err(|e| self.report(e))?;
        if is_blank(&content) {
            return Err(self.report(Error::request_invalid("Buffer is empty")));
        }

        Ok((cfg, content))
    }

    async fn put_object(&self, cfg: &Config, key: &str, content: Bytes) -> Result<String> {
        let url = object_url(cfg, key);
        debug!("uploading {} bytes to {url}", content.len());

        let signer = RequestSigner::new(cfg.region());
        let headers = signer.sign_parts(Method::PUT, &url, content.clone(), &cfg.credential())?;

        let mut req = http::Request::builder()
            .method(Method::PUT)
            .uri(&url)
            .body(content)?;
        req.headers_mut().extend(headers);

        let resp = self.ctx.http_send(req).await.map_err(|e| {
            Error::unexpected(format!("Connection Error: {}", e.message())).with_source(e)
        })?;

        let status = resp.status();
        debug!("upload of {key} got status {status}");
        match status {
            StatusCode::OK | StatusCode::CREATED => Ok(public_url(cfg, key)),
            StatusCode::FORBIDDEN => Err(Error::credential_denied(
                "HTTP Error 403: Forbidden (signature rejected, check credentials and clock skew)",
            )),
            s if s.is_success() => Err(Error::unexpected(format!(
                "Upload failed with status {}",
                s.as_u16()
            ))),
            s => Err(Error::unexpected(format!(
                "HTTP Error {}: {}",
                s.as_u16(),
                s.canonical_reason().unwrap_or("Unknown")
            ))),
        }
    }

    fn report(&self, err: Error) -> Error {
        warn!("share failed: {err}");
        self.host.notify(Notice::Error(error_notice(&err)));
        err
    }
}
