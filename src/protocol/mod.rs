// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for talking to the device.
//!
//! A [`Transport`] performs one HTTP round trip at a time and reports the
//! raw status code and body. It does not interpret either: mapping a
//! non-success status or an invalid body to an error is the job of
//! [`Device`](crate::Device).
//!
//! # Implementations
//!
//! - [`HttpTransport`]: `reqwest`-based client with a lazily created
//!   connection pool (feature `http`, enabled by default)
//!
//! Any other type can be plugged in, which is how the tests drive a device
//! without a network.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};

use crate::error::ConnectionError;

/// HTTP method used by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read-only query.
    Get,
    /// State-changing command with a JSON body.
    Post,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
}

impl TransportRequest {
    /// Creates a `GET` request without body.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    /// Creates a `POST` request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the request path, starting with `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    status: u16,
    body: String,
}

impl TransportResponse {
    /// Creates a response with the given status code and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for transports that can carry requests to a device.
///
/// Implementations must not retry and must not impose timeouts beyond their
/// own configuration; both concerns belong to the caller.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Performs one request/response round trip.
    ///
    /// A non-success HTTP status is still `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the device could not be reached, the
    /// request timed out, or the body could not be read.
    async fn send(&self, request: &TransportRequest)
    -> Result<TransportResponse, ConnectionError>;

    /// Acquires the underlying connection resources ahead of the first request.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the resources cannot be created.
    fn open(&self) -> Result<(), ConnectionError> {
        Ok(())
    }

    /// Releases any pooled connections.
    fn close(&self);
}
