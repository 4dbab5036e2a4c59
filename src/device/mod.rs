// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device session: the single entry point for talking to one fan.
//!
//! A [`Device`] owns the transport, turns commands into requests, validates
//! the answers and keeps the last confirmed [`Status`].
//!
//! # Lifecycle
//!
//! ```text
//! Unconnected --open / first call--> Connected --first success--> HasStatus
//!      \                                  \                          /
//!       +------------- close / drop -------+-----------> Closed <---+
//! ```
//!
//! Every call after [`close`](Device::close) fails with
//! [`Error::SessionClosed`] without touching the transport.
//!
//! # Caching
//!
//! Successful calls replace the cached snapshot as their last step; failed
//! calls leave it as it was. [`status`](Device::status) never does I/O and
//! never reports staleness: call [`update`](Device::update) to refresh.
//!
//! Two mutating calls in flight on the same device commit in completion
//! order, so the cache ends up reflecting whichever answer arrived last.
//! Serialize calls externally if a defined outcome matters.
//!
//! ```no_run
//! use fanlight_lib::Device;
//! use fanlight_lib::command::LightCommand;
//!
//! # async fn example() -> fanlight_lib::Result<()> {
//! let device = Device::http("192.168.1.100").build()?;
//!
//! device.update().await?;
//! device.light(LightCommand::new().on(true).brightness(50)).await?;
//!
//! if let Some(status) = device.status() {
//!     println!("light at {}", status.light_brightness());
//! }
//!
//! device.close();
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod http_builder;

#[cfg(feature = "http")]
pub use http_builder::HttpDeviceBuilder;

use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};

use crate::command::{
    AdaptiveLearningCommand, AwayCommand, Command, FanCommand, INFO_PATH, LightCommand,
    RebootCommand, STATUS_PATH,
};
use crate::error::{Error, ParseError, ValueError};
use crate::protocol::{Transport, TransportRequest, TransportResponse};
use crate::response::{DeviceInfo, Status};

/// Where a device session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Created, transport not acquired yet.
    Unconnected,
    /// Transport acquired, no status received yet.
    Connected,
    /// At least one status report has been cached.
    HasStatus,
    /// Closed; every further call fails.
    Closed,
}

/// A session with one fan/light device.
///
/// The transport is either owned (released on [`close`](Self::close) or
/// drop) or shared with the caller (never released by the session).
///
/// Methods take `&self`, so a `Device` can be shared behind an `Arc`.
#[derive(Debug)]
pub struct Device<T: Transport> {
    host: String,
    transport: Arc<T>,
    owns_transport: bool,
    state: Mutex<SessionState>,
    status: RwLock<Option<Arc<Status>>>,
    info: RwLock<Option<Arc<DeviceInfo>>>,
}

impl<T: Transport> Device<T> {
    /// Creates a session that owns `transport`.
    ///
    /// The transport is released when the session is closed or dropped.
    #[must_use]
    pub fn with_transport(host: impl Into<String>, transport: T) -> Self {
        Self::from_parts(host.into(), Arc::new(transport), true)
    }

    /// Creates a session on a transport the caller keeps ownership of.
    ///
    /// Closing the session does not release the transport.
    #[must_use]
    pub fn with_shared_transport(host: impl Into<String>, transport: Arc<T>) -> Self {
        Self::from_parts(host.into(), transport, false)
    }

    fn from_parts(host: String, transport: Arc<T>, owns_transport: bool) -> Self {
        Self {
            host,
            transport,
            owns_transport,
            state: Mutex::new(SessionState::Unconnected),
            status: RwLock::new(None),
            info: RwLock::new(None),
        }
    }

    /// Returns the device address this session targets.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Returns `true` once the session has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state() == SessionState::Closed
    }

    // ========== Lifecycle ==========

    /// Acquires the transport ahead of the first call.
    ///
    /// Calling it is optional: the first request opens the transport too.
    ///
    /// # Errors
    ///
    /// Returns `Error::SessionClosed` after [`close`](Self::close), or
    /// `Error::Connection` if the transport cannot be acquired.
    pub fn open(&self) -> Result<(), Error> {
        let mut state = self.state.lock();
        match *state {
            SessionState::Closed => Err(Error::SessionClosed),
            SessionState::Unconnected => {
                self.transport.open()?;
                *state = SessionState::Connected;
                tracing::info!(host = %self.host, "Device session opened");
                Ok(())
            }
            SessionState::Connected | SessionState::HasStatus => Ok(()),
        }
    }

    /// Closes the session and releases an owned transport.
    ///
    /// Idempotent. Cached status and info stay readable.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if *state == SessionState::Closed {
            return;
        }
        *state = SessionState::Closed;
        drop(state);

        if self.owns_transport {
            self.transport.close();
        }
        tracing::info!(host = %self.host, "Device session closed");
    }

    // ========== Cached State ==========

    /// Returns the last confirmed status, or `None` before the first success.
    ///
    /// Never performs I/O and never fails.
    #[must_use]
    pub fn status(&self) -> Option<Arc<Status>> {
        self.status.read().clone()
    }

    /// Returns the cached device information, if [`update_info`](Self::update_info)
    /// has succeeded before.
    #[must_use]
    pub fn info(&self) -> Option<Arc<DeviceInfo>> {
        self.info.read().clone()
    }

    // ========== Queries ==========

    /// Queries the full device status and caches it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` if the device is unreachable,
    /// `Error::Request` on a non-success HTTP status,
    /// `Error::MalformedResponse` if the body is invalid, or
    /// `Error::SessionClosed` after [`close`](Self::close). The cache is
    /// unchanged on every error.
    pub async fn update(&self) -> Result<Arc<Status>, Error> {
        self.ensure_not_closed()?;
        let response = self.round_trip(&TransportRequest::get(STATUS_PATH)).await?;
        let status = Status::from_json(response.body()).map_err(|e| self.malformed(e))?;
        Ok(self.commit(status))
    }

    /// Queries the static device information and caches it.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update).
    pub async fn update_info(&self) -> Result<Arc<DeviceInfo>, Error> {
        self.ensure_not_closed()?;
        let response = self.round_trip(&TransportRequest::get(INFO_PATH)).await?;
        let info = DeviceInfo::from_json(response.body()).map_err(|e| self.malformed(e))?;
        let info = Arc::new(info);
        *self.info.write() = Some(Arc::clone(&info));
        Ok(info)
    }

    // ========== Commands ==========

    /// Changes the fan state and returns the confirmed status.
    ///
    /// Breeze arguments are only accepted when the cached status reports
    /// breeze support.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for out-of-range arguments or unsupported
    /// breeze mode (before any I/O), otherwise as [`update`](Self::update).
    pub async fn fan(&self, command: FanCommand) -> Result<Arc<Status>, Error> {
        self.ensure_not_closed()?;
        if command.uses_breeze_mode()
            && !self.status().is_some_and(|status| status.has_breeze_mode())
        {
            return Err(ValueError::Unsupported("breeze mode").into());
        }
        self.execute(&command).await
    }

    /// Changes the light state and returns the confirmed status.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for out-of-range brightness or a sleep time in
    /// the past (before any I/O), otherwise as [`update`](Self::update).
    pub async fn light(&self, command: LightCommand) -> Result<Arc<Status>, Error> {
        self.execute(&command).await
    }

    /// Enables or disables away mode and returns the confirmed status.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update).
    pub async fn away(&self, on: bool) -> Result<Arc<Status>, Error> {
        self.execute(&AwayCommand::new(on)).await
    }

    /// Enables or disables adaptive learning and returns the confirmed status.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update).
    pub async fn adaptive_learning(&self, on: bool) -> Result<Arc<Status>, Error> {
        self.execute(&AdaptiveLearningCommand::new(on)).await
    }

    /// Restarts the device.
    ///
    /// The device drops the connection while restarting, so a connection
    /// error counts as success. The cached status is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Error::Request` on a non-success HTTP status or
    /// `Error::SessionClosed` after [`close`](Self::close).
    pub async fn reboot(&self) -> Result<(), Error> {
        self.ensure_not_closed()?;
        let request = RebootCommand.to_request(Utc::now())?;
        match self.round_trip(&request).await {
            Ok(_) => Ok(()),
            Err(Error::Connection(err)) => {
                tracing::debug!(host = %self.host, error = %err, "Connection dropped by reboot");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Sends a status-returning command and caches the confirmed status.
    ///
    /// A full report replaces the cache; a partial one is merged over it.
    async fn execute<C: Command>(&self, command: &C) -> Result<Arc<Status>, Error> {
        self.ensure_not_closed()?;
        let request = command.to_request(Utc::now())?;
        let response = self.round_trip(&request).await?;

        let status = match self.status() {
            Some(prior) => prior.merge_json(response.body()),
            None => Status::from_json(response.body()),
        }
        .map_err(|e| self.malformed(e))?;

        Ok(self.commit(status))
    }

    // ========== Helpers ==========

    fn ensure_not_closed(&self) -> Result<(), Error> {
        if self.is_closed() {
            return Err(Error::SessionClosed);
        }
        Ok(())
    }

    /// Performs one round trip and rejects non-success statuses.
    async fn round_trip(&self, request: &TransportRequest) -> Result<TransportResponse, Error> {
        self.open()?;

        let response = self.transport.send(request).await.inspect_err(|err| {
            tracing::warn!(host = %self.host, path = request.path(), error = %err, "Request failed");
        })?;

        if !response.is_success() {
            tracing::warn!(
                host = %self.host,
                path = request.path(),
                status = response.status(),
                "Device rejected request"
            );
            let message = match response.body().trim() {
                "" => format!("HTTP {}", response.status()),
                body => body.to_string(),
            };
            return Err(Error::Request {
                status_code: response.status(),
                message,
            });
        }

        Ok(response)
    }

    fn malformed(&self, err: ParseError) -> Error {
        tracing::warn!(host = %self.host, error = %err, "Malformed device response");
        Error::MalformedResponse(err)
    }

    /// Replaces the cached status as the final step of a successful call.
    fn commit(&self, status: Status) -> Arc<Status> {
        let status = Arc::new(status);
        *self.status.write() = Some(Arc::clone(&status));

        let mut state = self.state.lock();
        if *state == SessionState::Connected {
            *state = SessionState::HasStatus;
        }
        status
    }
}

impl<T: Transport> Drop for Device<T> {
    fn drop(&mut self) {
        if self.owns_transport && *self.state.get_mut() != SessionState::Closed {
            self.transport.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectionError;

    /// Transport answering every request with the same canned response.
    #[derive(Debug, Default)]
    struct CannedTransport {
        response: Option<TransportResponse>,
        opened: Mutex<usize>,
        closed: Mutex<usize>,
    }

    impl Transport for CannedTransport {
        async fn send(
            &self,
            _request: &TransportRequest,
        ) -> Result<TransportResponse, ConnectionError> {
            self.response
                .clone()
                .ok_or_else(|| ConnectionError::Failed("refused".to_string()))
        }

        fn open(&self) -> Result<(), ConnectionError> {
            *self.opened.lock() += 1;
            Ok(())
        }

        fn close(&self) {
            *self.closed.lock() += 1;
        }
    }

    fn ok_status() -> CannedTransport {
        CannedTransport {
            response: Some(TransportResponse::new(
                200,
                r#"{"fanOn": true, "fanSpeed": 3, "lightOn": false, "lightBrightness": 50}"#,
            )),
            ..CannedTransport::default()
        }
    }

    #[test]
    fn new_device_is_unconnected() {
        let device = Device::with_transport("fan.local", ok_status());
        assert_eq!(device.host(), "fan.local");
        assert_eq!(device.state(), SessionState::Unconnected);
        assert!(device.status().is_none());
        assert!(device.info().is_none());
    }

    #[test]
    fn open_is_idempotent() {
        let device = Device::with_transport("fan.local", ok_status());
        device.open().unwrap();
        device.open().unwrap();
        assert_eq!(device.state(), SessionState::Connected);
        assert_eq!(*device.transport().opened.lock(), 1);
    }

    #[test]
    fn close_releases_owned_transport_once() {
        let device = Device::with_transport("fan.local", ok_status());
        device.close();
        device.close();
        assert_eq!(device.state(), SessionState::Closed);
        assert_eq!(*device.transport().closed.lock(), 1);
        assert!(matches!(device.open(), Err(Error::SessionClosed)));
    }

    #[test]
    fn drop_keeps_shared_transport() {
        let transport = Arc::new(ok_status());
        {
            let device = Device::with_shared_transport("fan.local", Arc::clone(&transport));
            device.open().unwrap();
        }
        // shared transports are never released by the session
        assert_eq!(*transport.closed.lock(), 0);
    }

    #[tokio::test]
    async fn update_moves_to_has_status() {
        let device = Device::with_transport("fan.local", ok_status());
        let status = device.update().await.unwrap();
        assert!(status.fan_on());
        assert_eq!(device.state(), SessionState::HasStatus);
        assert_eq!(device.status().as_deref(), Some(&*status));
    }

    #[tokio::test]
    async fn connection_failure_keeps_state_connected() {
        let device = Device::with_transport("fan.local", CannedTransport::default());
        let err = device.update().await.unwrap_err();
        assert!(err.is_connection());
        assert_eq!(device.state(), SessionState::Connected);
        assert!(device.status().is_none());
    }

    #[tokio::test]
    async fn breeze_requires_reported_support() {
        let device = Device::with_transport("fan.local", ok_status());
        device.update().await.unwrap();
        let err = device
            .fan(FanCommand::new().wind(true))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::Unsupported("breeze mode"))
        ));
    }

    #[tokio::test]
    async fn breeze_rejected_before_first_status() {
        let device = Device::with_transport("fan.local", ok_status());
        let err = device
            .fan(FanCommand::new().wind_speed(2))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::Unsupported(_))));
        // nothing was sent, so the transport was never acquired
        assert_eq!(*device.transport().opened.lock(), 0);
        assert!(device.status().is_none());
    }
}
