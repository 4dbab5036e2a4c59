// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport implementation.

use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Client;

use crate::error::ConnectionError;
use crate::protocol::{Method, Transport, TransportRequest, TransportResponse};

// ============================================================================
// HttpConfig - Connection parameters for a device
// ============================================================================

/// Configuration for reaching a device over HTTP.
///
/// # Examples
///
/// ```
/// use fanlight_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = HttpConfig::new("192.168.1.100");
/// assert_eq!(config.base_url(), "http://192.168.1.100");
///
/// // With all options
/// let config = HttpConfig::new("fan.local")
///     .with_port(8080)
///     .with_https()
///     .with_credentials("admin", "password")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "https://fan.local:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    credentials: Option<(String, String)>,
    timeout: Duration,
    user_agent: String,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// The host may be a bare hostname or IP address, or a full base URL
    /// such as `http://127.0.0.1:8080`, in which case port and scheme
    /// settings are ignored.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: format!("fanlight_lib/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets HTTP basic authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            return self.host.trim_end_matches('/').to_string();
        }
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an `HttpTransport` from this configuration.
    ///
    /// No connection is opened yet.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::InvalidAddress` if the host is empty.
    pub fn into_transport(self) -> Result<HttpTransport, ConnectionError> {
        HttpTransport::new(self)
    }
}

// ============================================================================
// HttpTransport - reqwest-backed transport
// ============================================================================

/// HTTP transport for a single device.
///
/// The pooled `reqwest` client is created on [`open`](Transport::open) or on
/// the first request, and dropped again by [`close`](Transport::close), which
/// releases every idle connection. A later request creates a fresh pool.
///
/// # Examples
///
/// ```no_run
/// use fanlight_lib::protocol::{HttpConfig, Transport, TransportRequest};
///
/// # async fn example() -> fanlight_lib::Result<()> {
/// let transport = HttpConfig::new("192.168.1.100").into_transport()?;
/// let response = transport.send(&TransportRequest::get("/api/v1/status")).await?;
/// println!("{} {}", response.status(), response.body());
/// transport.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    config: HttpConfig,
    base_url: String,
    client: Mutex<Option<Client>>,
}

impl HttpTransport {
    /// Creates a transport for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::InvalidAddress` if the host is empty.
    pub fn new(config: HttpConfig) -> Result<Self, ConnectionError> {
        if config.host().trim().is_empty() {
            return Err(ConnectionError::InvalidAddress(
                "host is required".to_string(),
            ));
        }
        let base_url = config.base_url();
        Ok(Self {
            config,
            base_url,
            client: Mutex::new(None),
        })
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Returns `true` while a connection pool is held.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.client.lock().is_some()
    }

    /// Builds the URL for a request path.
    fn build_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Returns the pooled client, creating it if needed.
    fn client(&self) -> Result<Client, ConnectionError> {
        let mut guard = self.client.lock();
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .timeout(self.config.timeout())
            .user_agent(self.config.user_agent())
            .build()
            .map_err(ConnectionError::Http)?;

        tracing::debug!(base_url = %self.base_url, "Opened HTTP connection pool");
        *guard = Some(client.clone());
        Ok(client)
    }

    fn map_error(&self, err: reqwest::Error) -> ConnectionError {
        if err.is_timeout() {
            let millis = u64::try_from(self.config.timeout().as_millis()).unwrap_or(u64::MAX);
            ConnectionError::Timeout(millis)
        } else {
            ConnectionError::Http(err)
        }
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &TransportRequest,
    ) -> Result<TransportResponse, ConnectionError> {
        let client = self.client()?;
        let url = self.build_url(request.path());

        tracing::debug!(
            method = request.method().as_str(),
            url = %url,
            body = ?request.body(),
            "Sending HTTP request"
        );

        let mut builder = match request.method() {
            Method::Get => client.get(&url),
            Method::Post => client.post(&url),
        }
        .header(reqwest::header::ACCEPT, "application/json");

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        if let Some((username, password)) = self.config.credentials() {
            builder = builder.basic_auth(username, Some(password));
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        tracing::debug!(status, body = %body, "Received HTTP response");

        Ok(TransportResponse::new(status, body))
    }

    fn open(&self) -> Result<(), ConnectionError> {
        self.client().map(|_| ())
    }

    fn close(&self) {
        if self.client.lock().take().is_some() {
            tracing::debug!(base_url = %self.base_url, "Released HTTP connection pool");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_appends_path() {
        let transport = HttpConfig::new("192.168.1.100").into_transport().unwrap();
        assert_eq!(
            transport.build_url("/api/v1/status"),
            "http://192.168.1.100/api/v1/status"
        );
    }

    #[test]
    fn full_url_host_is_used_verbatim() {
        let transport = HttpConfig::new("http://127.0.0.1:8080/")
            .with_https()
            .into_transport()
            .unwrap();
        assert_eq!(transport.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn empty_host_is_rejected() {
        assert!(matches!(
            HttpConfig::new("  ").into_transport(),
            Err(ConnectionError::InvalidAddress(_))
        ));
    }

    #[test]
    fn pool_is_lazy_and_released_on_close() {
        let transport = HttpConfig::new("fan.local").into_transport().unwrap();
        assert!(!transport.is_open());
        transport.open().unwrap();
        assert!(transport.is_open());
        transport.close();
        assert!(!transport.is_open());
        // closing twice is harmless
        transport.close();
    }

    // =========================================================================
    // HttpConfig tests
    // =========================================================================

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("192.168.1.100");
        assert_eq!(config.host(), "192.168.1.100");
        assert_eq!(config.port(), 80);
        assert!(!config.use_https());
        assert!(config.credentials().is_none());
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.user_agent().starts_with("fanlight_lib/"));
    }

    #[test]
    fn http_config_with_https() {
        let config = HttpConfig::new("192.168.1.100").with_https();
        assert!(config.use_https());
        assert_eq!(config.port(), 443);
    }

    #[test]
    fn http_config_with_https_custom_port() {
        let config = HttpConfig::new("192.168.1.100")
            .with_port(8443)
            .with_https();
        assert_eq!(config.port(), 8443);
        assert_eq!(config.base_url(), "https://192.168.1.100:8443");
    }

    #[test]
    fn http_config_with_credentials() {
        let config = HttpConfig::new("192.168.1.100").with_credentials("admin", "secret");
        assert_eq!(config.credentials(), Some(("admin", "secret")));
    }

    #[test]
    fn http_config_base_url_custom_port() {
        let config = HttpConfig::new("192.168.1.100").with_port(8080);
        assert_eq!(config.base_url(), "http://192.168.1.100:8080");
    }

    #[test]
    fn http_config_with_user_agent() {
        let config = HttpConfig::new("fan.local").with_user_agent("custom/1.0");
        assert_eq!(config.user_agent(), "custom/1.0");
    }
}
