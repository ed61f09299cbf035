//! Share text buffers to S3 compatible object stores.
//!
//! This crate holds the AWS Signature Version 4 signer for single chunk `PUT`
//! uploads and the share workflow built on top of it.
//!
//! ## Signing
//!
//! ```
//! use http::Method;
//! use sharesign_s3::{Credential, RequestSigner};
//!
//! # fn example() -> sharesign_core::Result<()> {
//! let signer = RequestSigner::new("global");
//! let cred = Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY");
//!
//! let headers = signer.sign_parts(
//!     Method::PUT,
//!     "https://s3.example.com/uploads/notes.txt",
//!     "hello",
//!     &cred,
//! )?;
//! assert!(headers.contains_key("authorization"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Sharing
//!
//! Implement [`Host`] for the editor and hand it to an [`Uploader`] together
//! with a [`Context`](sharesign_core::Context) that can send http requests.

mod config;
pub use config::Config;

mod constants;
pub use constants::DEFAULT_BUCKET;
pub use constants::DEFAULT_REGION;
pub use constants::SHARE_TO_S3_ACCESS_KEY;
pub use constants::SHARE_TO_S3_BUCKET;
pub use constants::SHARE_TO_S3_ENDPOINT;
pub use constants::SHARE_TO_S3_REGION;
pub use constants::SHARE_TO_S3_SECRET_KEY;
pub use constants::SHARE_TO_S3_URL_PREFIX;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod share;
pub use share::default_object_name;
pub use share::error_notice;
pub use share::normalize_object_name;
pub use share::object_url;
pub use share::public_url;
pub use share::Host;
pub use share::Notice;
pub use share::Uploader;
