// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `fanlight` library.
//!
//! Every fallible operation returns [`Error`]. Its variants map one-to-one to
//! the failure classes a caller has to distinguish:
//!
//! | Variant | Raised when | Cached status |
//! |---------|-------------|---------------|
//! | [`Error::Value`] | an argument is outside its domain | untouched, no I/O |
//! | [`Error::Connection`] | the device cannot be reached or times out | untouched |
//! | [`Error::Request`] | the device answers with a non-success HTTP status | untouched |
//! | [`Error::MalformedResponse`] | the body fails schema or range validation | untouched |
//! | [`Error::SessionClosed`] | the device session was closed | untouched, no I/O |

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument is outside its declared domain.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The transport could not complete the round trip.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// The device returned a non-success HTTP status.
    #[error("request failed with HTTP {status_code}: {message}")]
    Request {
        /// HTTP status code returned by the device.
        status_code: u16,
        /// Response body, or the canonical reason when the body is empty.
        message: String,
    },

    /// The response body could not be turned into a valid model.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] ParseError),

    /// The session was closed before the operation was attempted.
    #[error("device session is closed")]
    SessionClosed,
}

impl Error {
    /// Returns `true` if this is a transport-level failure.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code for [`Error::Request`] errors.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Errors related to argument validation.
///
/// These are always raised before anything is sent to the device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("{field} value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the argument.
        field: &'static str,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A sleep timer was requested for an instant that already passed.
    #[error("sleep time {0} is in the past")]
    SleepInPast(chrono::DateTime<chrono::Utc>),

    /// An unknown fan direction string was provided.
    #[error("invalid fan direction: {0}")]
    InvalidDirection(String),

    /// The device does not support the requested feature.
    #[error("device does not support {0}")]
    Unsupported(&'static str),
}

/// Errors raised by a [`Transport`](crate::protocol::Transport).
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// HTTP client failure (refused connection, DNS, TLS, broken body).
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Generic connection failure.
    #[error("connection failed: {0}")]
    Failed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The device answered with an empty object.
    #[error("device returned an empty response")]
    EmptyResponse,

    /// A required field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(&'static str),

    /// A field is present but its value is not acceptable.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: &'static str,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
