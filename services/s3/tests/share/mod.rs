mod config;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use sharesign_core::{Context, Error, HttpSend, Result};
use sharesign_s3::{Config, Host, Notice};
use std::sync::{Arc, Mutex};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_config() -> Config {
    Config {
        endpoint: Some("http://127.0.0.1:9000".to_string()),
        access_key_id: Some("minio".to_string()),
        secret_access_key: Some("minio-secret-key".to_string()),
        url_prefix: Some("https://files.example.com/".to_string()),
        ..Default::default()
    }
}

/// Everything the host was asked to show or store.
#[derive(Debug, Default)]
pub struct Recorded {
    pub notices: Vec<Notice>,
    pub clipboard: Option<String>,
    pub prompted_with: Option<String>,
}

/// Host with canned settings and buffer that records its outputs.
#[derive(Debug, Clone)]
pub struct MockHost {
    pub config: Config,
    pub content: Bytes,
    pub filename: Option<String>,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl MockHost {
    pub fn new(config: Config, content: &'static str) -> Self {
        Self {
            config,
            content: Bytes::from_static(content.as_bytes()),
            filename: None,
            recorded: Arc::default(),
        }
    }

    pub fn with_filename(mut self, name: Option<&str>) -> Self {
        self.filename = name.map(String::from);
        self
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.recorded.lock().unwrap().notices.clone()
    }

    pub fn clipboard(&self) -> Option<String> {
        self.recorded.lock().unwrap().clipboard.clone()
    }

    pub fn prompted_with(&self) -> Option<String> {
        self.recorded.lock().unwrap().prompted_with.clone()
    }
}

#[async_trait]
impl Host for MockHost {
    async fn secrets(&self) -> Result<Config> {
        Ok(self.config.clone())
    }

    async fn buffer_content(&self) -> Result<Bytes> {
        Ok(self.content.clone())
    }

    fn notify(&self, notice: Notice) {
        self.recorded.lock().unwrap().notices.push(notice);
    }

    async fn prompt_filename(&self, default: &str) -> Option<String> {
        self.recorded.lock().unwrap().prompted_with = Some(default.to_string());
        self.filename.clone()
    }

    fn set_clipboard(&self, text: &str) {
        self.recorded.lock().unwrap().clipboard = Some(text.to_string());
    }
}

/// Parts of a request seen by [`MockHttpSend`].
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: http::Method,
    pub uri: String,
    pub headers: http::HeaderMap,
    pub body: Bytes,
}

/// HttpSend that answers every request with a fixed status and keeps the
/// requests it saw.
#[derive(Debug, Clone)]
pub struct MockHttpSend {
    pub status: Option<StatusCode>,
    pub requests: Arc<Mutex<Vec<SentRequest>>>,
}

impl MockHttpSend {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status: Some(status),
            requests: Arc::default(),
        }
    }

    /// Fail every request like an unreachable endpoint.
    pub fn unreachable() -> Self {
        Self {
            status: None,
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        self.requests.lock().unwrap().push(SentRequest {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });

        let Some(status) = self.status else {
            return Err(Error::unexpected("connection refused"));
        };
        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::new())
            .expect("response must be valid"))
    }
}

pub fn context(http: MockHttpSend) -> Context {
    Context::new().with_http_send(http)
}
