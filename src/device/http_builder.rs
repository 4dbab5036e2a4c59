// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP device builder.

use std::sync::Arc;
use std::time::Duration;

use crate::device::Device;
use crate::error::Error;
use crate::protocol::{HttpConfig, HttpTransport};
use crate::response::Status;

/// Builder for creating HTTP-based device sessions.
///
/// This builder can be created in two ways:
/// - `Device::http("host")` - Simple host string
/// - `Device::http_config(HttpConfig::new("host").with_port(8080))` - Advanced configuration
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use fanlight_lib::Device;
///
/// # async fn example() -> fanlight_lib::Result<()> {
/// // No network access until the first call
/// let device = Device::http("192.168.1.100")
///     .with_timeout(Duration::from_secs(3))
///     .build()?;
///
/// // Open the transport and fetch the initial status in one step
/// let (device, initial_status) = Device::http("192.168.1.100")
///     .connect()
///     .await?;
/// println!("fan on: {}", initial_status.fan_on());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpDeviceBuilder {
    config: HttpConfig,
}

impl HttpDeviceBuilder {
    /// Creates a new builder with the specified HTTP configuration.
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Enables HTTPS.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.config = self.config.with_https();
        self
    }

    /// Sets HTTP basic authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.config = self.config.with_credentials(username, password);
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the session without touching the network.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` if the host is empty.
    pub fn build(self) -> Result<Device<HttpTransport>, Error> {
        let host = self.config.host().to_string();
        let transport = self.config.into_transport()?;
        Ok(Device::with_transport(host, transport))
    }

    /// Builds the session, opens the transport and queries the status.
    ///
    /// # Errors
    ///
    /// Returns any error [`Device::update`] can return.
    pub async fn connect(self) -> Result<(Device<HttpTransport>, Arc<Status>), Error> {
        let device = self.build()?;
        device.open()?;
        let status = device.update().await?;
        Ok((device, status))
    }
}

// ========== HTTP Device Entry Point ==========

impl Device<HttpTransport> {
    /// Creates a builder for an HTTP-based device from a host string.
    ///
    /// Equivalent to `Device::http_config(HttpConfig::new(host))`.
    #[must_use]
    pub fn http(host: impl Into<String>) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(HttpConfig::new(host))
    }

    /// Creates a builder for an HTTP-based device from an `HttpConfig`.
    #[must_use]
    pub fn http_config(config: HttpConfig) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::SessionState;
    use crate::protocol::Transport;

    #[test]
    fn builder_applies_options() {
        let builder = Device::http("192.168.1.100")
            .with_port(8080)
            .with_credentials("admin", "pass")
            .with_timeout(Duration::from_secs(2));

        assert_eq!(builder.config().port(), 8080);
        assert_eq!(builder.config().credentials(), Some(("admin", "pass")));
        assert_eq!(builder.config().timeout(), Duration::from_secs(2));
    }

    #[test]
    fn build_does_not_open() {
        let device = Device::http("192.168.1.100").build().unwrap();
        assert_eq!(device.host(), "192.168.1.100");
        assert_eq!(device.state(), SessionState::Unconnected);
        assert!(!device.transport().is_open());
    }

    #[test]
    fn open_and_close_manage_pool() {
        let device = Device::http_config(HttpConfig::new("fan.local").with_https())
            .build()
            .unwrap();
        device.open().unwrap();
        assert!(device.transport().is_open());
        assert_eq!(device.transport().base_url(), "https://fan.local");
        device.close();
        assert!(!device.transport().is_open());
    }

    #[test]
    fn empty_host_fails_to_build() {
        assert!(matches!(
            Device::http("").build(),
            Err(Error::Connection(_))
        ));
    }

    #[test]
    fn transport_trait_is_implemented() {
        fn assert_transport<T: Transport>(_: &T) {}
        let device = Device::http("fan.local").build().unwrap();
        assert_transport(device.transport());
    }
}
