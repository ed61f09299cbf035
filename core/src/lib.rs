// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Core components for signing and sharing object uploads.
//!
//! This crate provides the foundational types shared by the sharesign crates.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending, and environment access
//! - **SigningRequest**: The fully buffered request (method, host, path, payload) handed to a signer
//! - **Error**: The error type every sharesign crate returns
//!
//! ## Example
//!
//! ```
//! use bytes::Bytes;
//! use http::Method;
//! use sharesign_core::{Context, SigningRequest, StaticEnv};
//!
//! # fn example() -> sharesign_core::Result<()> {
//! let ctx = Context::new().with_env(StaticEnv::default());
//! assert!(ctx.env_var("SHARE_TO_S3_ENDPOINT").is_none());
//!
//! let req = SigningRequest::build(
//!     Method::PUT,
//!     "https://s3.example.com/uploads/notes.txt",
//!     Bytes::from_static(b"hello"),
//! )?;
//! assert_eq!(req.path, "/uploads/notes.txt");
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::FileRead;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopFileRead;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

mod request;
pub use request::SigningRequest;
