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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Headers used in the signed upload.
pub const X_AMZ_CONTENT_SHA_256: &str = "x-amz-content-sha256";
pub const X_AMZ_DATE: &str = "x-amz-date";

/// Content type of every shared object.
pub const CONTENT_TYPE_TEXT_UTF8: &str = "text/plain; charset=utf-8";

/// Signing algorithm name.
pub const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";
/// Service name in the credential scope.
pub const SERVICE_S3: &str = "s3";
/// Terminator of the credential scope.
pub const AWS4_REQUEST: &str = "aws4_request";

// Config defaults.
pub const DEFAULT_BUCKET: &str = "uploads";
pub const DEFAULT_REGION: &str = "global";

// Env values used to configure sharing.
pub const SHARE_TO_S3_ENDPOINT: &str = "SHARE_TO_S3_ENDPOINT";
pub const SHARE_TO_S3_ACCESS_KEY: &str = "SHARE_TO_S3_ACCESS_KEY";
pub const SHARE_TO_S3_SECRET_KEY: &str = "SHARE_TO_S3_SECRET_KEY";
pub const SHARE_TO_S3_URL_PREFIX: &str = "SHARE_TO_S3_URL_PREFIX";
pub const SHARE_TO_S3_BUCKET: &str = "SHARE_TO_S3_BUCKET";
pub const SHARE_TO_S3_REGION: &str = "SHARE_TO_S3_REGION";

/// Prefix of every message shown to the user.
pub const NOTICE_PREFIX: &str = "ShareToS3";

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - `/` is kept since it separates path segments.
pub static AWS_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
