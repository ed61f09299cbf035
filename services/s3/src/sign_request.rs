use crate::constants::{
    AWS4_HMAC_SHA256, AWS4_REQUEST, AWS_URI_ENCODE_SET, CONTENT_TYPE_TEXT_UTF8, DEFAULT_REGION,
    SERVICE_S3, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE,
};
use crate::Credential;
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method};
use log::debug;
use percent_encoding::utf8_percent_encode;
use sharesign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use sharesign_core::time::{self, format_iso8601, DateTime};
use sharesign_core::{Error, Result, SigningRequest};
use std::collections::BTreeMap;
use std::fmt::Write;

/// RequestSigner that implements AWS SigV4 for single chunk S3 uploads.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// Exactly four headers are signed: `content-type`, `host`, `x-amz-content-sha256`
/// and `x-amz-date`. The canonical query string is always empty.
///
/// The signer holds no secrets and no mutable state, so one instance can be shared
/// by any number of concurrent uploads.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    region: String,

    time: Option<DateTime>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl RequestSigner {
    /// Create a new signer for given region.
    ///
    /// Use `global` for S3 compatible stores that ignore region scoping. Real AWS
    /// endpoints need the actual bucket region.
    pub fn new(region: &str) -> Self {
        Self {
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Build the signing request from its parts and sign it.
    pub fn sign_parts(
        &self,
        method: Method,
        url: &str,
        payload: impl Into<Bytes>,
        cred: &Credential,
    ) -> Result<HeaderMap> {
        let req = SigningRequest::build(method, url, payload)?;
        self.sign(&req, cred)
    }

    /// Sign the request and return the headers to attach to it.
    ///
    /// The returned map always holds `host`, `x-amz-date`, `x-amz-content-sha256`,
    /// `content-type` and `authorization`.
    pub fn sign(&self, req: &SigningRequest, cred: &Credential) -> Result<HeaderMap> {
        cred.check()?;
        if self.region.is_empty() {
            return Err(Error::request_invalid("region is empty"));
        }

        // Both stamps come from this single clock read.
        let now = match self.time {
            Some(t) => t,
            None => time::now()?,
        };
        let amz_date = format_iso8601(now);
        let date_stamp = &amz_date[..8];

        let payload_hash = hex_sha256(&req.payload);

        let headers = BTreeMap::from([
            ("content-type", CONTENT_TYPE_TEXT_UTF8.to_string()),
            ("host", req.authority.as_str().to_string()),
            (X_AMZ_CONTENT_SHA_256, payload_hash.clone()),
            (X_AMZ_DATE, amz_date.clone()),
        ]);
        let (canonical_headers, signed_headers) = canonicalize_headers(&headers)?;

        let canonical_uri = canonicalize_uri(req)?;
        let creq = canonical_request_string(
            &req.method,
            &canonical_uri,
            &canonical_headers,
            &signed_headers,
            &payload_hash,
        )?;
        debug!("calculated canonical request: {creq}");

        // Scope: "20220313/<region>/s3/aws4_request"
        let scope = format!("{date_stamp}/{}/{SERVICE_S3}/{AWS4_REQUEST}", self.region);
        debug!("calculated scope: {scope}");

        let string_to_sign = string_to_sign(&amz_date, &scope, &creq)?;
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &cred.secret_access_key,
            date_stamp,
            &self.region,
            SERVICE_S3,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{AWS4_HMAC_SHA256} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            cred.access_key_id,
        ))?;
        authorization.set_sensitive(true);

        let mut out = HeaderMap::with_capacity(headers.len() + 1);
        for (name, value) in headers {
            out.insert(name, HeaderValue::from_str(&value)?);
        }
        out.insert(header::AUTHORIZATION, authorization);

        Ok(out)
    }
}

/// Percent-encode the decoded path with the AWS URI encode set.
fn canonicalize_uri(req: &SigningRequest) -> Result<String> {
    let path = req.path_percent_decoded()?;
    if path.is_empty() {
        return Ok("/".to_string());
    }
    Ok(utf8_percent_encode(&path, &AWS_URI_ENCODE_SET).to_string())
}

/// Returns `(canonical_headers, signed_headers)`.
///
/// Every canonical header line ends with `\n`. Names must already be lower-cased;
/// the map keeps them in lexicographic order.
fn canonicalize_headers(headers: &BTreeMap<&str, String>) -> Result<(String, String)> {
    let mut canonical = String::with_capacity(256);
    for (name, value) in headers {
        debug_assert!(!name.bytes().any(|b| b.is_ascii_uppercase()));
        writeln!(canonical, "{name}:{}", value.trim())?;
    }
    let signed = headers.keys().copied().collect::<Vec<_>>().join(";");

    Ok((canonical, signed))
}

fn canonical_request_string(
    method: &Method,
    canonical_uri: &str,
    canonical_headers: &str,
    signed_headers: &str,
    payload_hash: &str,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    writeln!(f, "{method}")?;
    writeln!(f, "{canonical_uri}")?;
    // Query is never signed.
    writeln!(f)?;
    // Canonical headers end with a newline, so a blank line follows them.
    writeln!(f, "{canonical_headers}")?;
    writeln!(f, "{signed_headers}")?;
    write!(f, "{payload_hash}")?;

    Ok(f)
}

// StringToSign:
//
// AWS4-HMAC-SHA256
// 20220313T072004Z
// 20220313/<region>/s3/aws4_request
// <hashed_canonical_request>
fn string_to_sign(amz_date: &str, scope: &str, creq: &str) -> Result<String> {
    let mut f = String::new();
    writeln!(f, "{AWS4_HMAC_SHA256}")?;
    writeln!(f, "{amz_date}")?;
    writeln!(f, "{scope}")?;
    write!(f, "{}", hex_sha256(creq.as_bytes()))?;
    Ok(f)
}

fn generate_signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}
