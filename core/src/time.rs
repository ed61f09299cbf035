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

//! Time related utils.

use crate::{Error, Result};
use chrono::Utc;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Read the system clock as a UTC instant.
///
/// Fails with [`crate::ErrorKind::ClockUnavailable`] if the clock reads before
/// the Unix epoch or outside the range `chrono` can represent.
pub fn now() -> Result<DateTime> {
    from_system_time(SystemTime::now())
}

/// Convert a `SystemTime` into a UTC instant.
pub fn from_system_time(time: SystemTime) -> Result<DateTime> {
    let since_epoch = time.duration_since(UNIX_EPOCH).map_err(|e| {
        Error::clock_unavailable("system clock reads before unix epoch").with_source(e)
    })?;
    let secs = i64::try_from(since_epoch.as_secs()).map_err(|e| {
        Error::clock_unavailable("system clock is out of range").with_source(e)
    })?;

    DateTime::from_timestamp(secs, since_epoch.subsec_nanos())
        .ok_or_else(|| Error::clock_unavailable("system clock is out of range"))
}

/// Format time into ISO8601 basic format: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse an RFC3339 string like `2022-03-01T08:12:34Z` into time.
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|v| v.with_timezone(&Utc))
        .map_err(|e| Error::unexpected(format!("invalid rfc3339 time: {s}")).with_source(e))
}
