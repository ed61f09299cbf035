use std::borrow::Cow;
use std::fmt::Debug;
use std::fmt::Formatter;

use bytes::Bytes;
use http::uri::Authority;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// A fully buffered request ready to be signed.
///
/// The payload must be materialized before signing because its hash is part
/// of the canonical request.
#[derive(Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP authority, used verbatim as the `host` header.
    pub authority: Authority,
    /// HTTP path, never empty.
    pub path: String,
    /// Request body.
    pub payload: Bytes,
}

impl Debug for SigningRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningRequest")
            .field("method", &self.method)
            .field("authority", &self.authority)
            .field("path", &self.path)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

impl SigningRequest {
    /// Build a signing request from method, absolute url and payload.
    ///
    /// - The url must carry an authority; relative urls are rejected.
    /// - An empty path is normalized into `/`.
    /// - Query strings are rejected since they are never signed.
    /// - An empty payload is rejected.
    pub fn build(method: Method, url: &str, payload: impl Into<Bytes>) -> Result<Self> {
        let uri: Uri = url
            .parse()
            .map_err(|e| Error::request_invalid(format!("url {url} is malformed")).with_source(e))?;

        let authority = uri
            .authority()
            .cloned()
            .ok_or_else(|| Error::request_invalid(format!("url {url} has no authority")))?;
        if authority.host().is_empty() {
            return Err(Error::request_invalid(format!("url {url} has no host")));
        }
        if uri.query().is_some() {
            return Err(Error::request_invalid(format!(
                "url {url} carries a query string which can't be signed"
            )));
        }

        let path = match uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        let payload = payload.into();
        if payload.is_empty() {
            return Err(Error::request_invalid("payload is empty"));
        }

        Ok(SigningRequest {
            method,
            authority,
            path,
            payload,
        })
    }

    /// Get the path percent decoded.
    ///
    /// Fails if the decoded bytes are not valid utf-8.
    pub fn path_percent_decoded(&self) -> Result<Cow<'_, str>> {
        percent_encoding::percent_decode_str(&self.path)
            .decode_utf8()
            .map_err(|e| {
                Error::request_invalid(format!("path {} is not valid utf-8", self.path))
                    .with_source(e)
            })
    }
}
