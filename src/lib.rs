// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `fanlight` Lib - A Rust library to control smart ceiling fans with lights.
//!
//! This library provides an async API to query and control a single
//! fan/light device over its local-network HTTP API.
//!
//! # Supported Features
//!
//! - **Status queries**: fan speed and direction, light brightness and color,
//!   away mode, sleep timers, firmware and network metadata
//! - **Fan control**: power, speed (0-6), direction, sleep timer, breeze mode
//! - **Light control**: power, brightness (0-100), color, sleep timer
//! - **Device modes**: away mode, adaptive learning, reboot
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use fanlight_lib::Device;
//! use fanlight_lib::command::{FanCommand, LightCommand};
//!
//! #[tokio::main]
//! async fn main() -> fanlight_lib::Result<()> {
//!     let device = Device::http("192.168.1.100").build()?;
//!
//!     let status = device.update().await?;
//!     println!("fan on: {}, speed {}", status.fan_on(), status.fan_speed());
//!
//!     device.fan(FanCommand::new().on(true).speed(3)).await?;
//!     device
//!         .light(LightCommand::new().on(true).brightness(50).sleep(Duration::from_secs(120)))
//!         .await?;
//!
//!     device.close();
//!     Ok(())
//! }
//! ```
//!
//! # Custom Transports
//!
//! [`Device`] is generic over [`Transport`](protocol::Transport), so any type
//! that can perform a JSON request/response round trip can drive it:
//!
//! ```
//! use fanlight_lib::Device;
//! use fanlight_lib::error::ConnectionError;
//! use fanlight_lib::protocol::{Transport, TransportRequest, TransportResponse};
//!
//! struct Offline;
//!
//! impl Transport for Offline {
//!     async fn send(&self, _: &TransportRequest) -> Result<TransportResponse, ConnectionError> {
//!         Err(ConnectionError::Failed("offline".to_string()))
//!     }
//!
//!     fn close(&self) {}
//! }
//!
//! let device = Device::with_transport("fan.local", Offline);
//! assert!(device.status().is_none());
//! ```

pub mod command;
mod device;
pub mod error;
pub mod protocol;
pub mod response;
pub mod types;

pub use command::{FanCommand, LightCommand};
#[cfg(feature = "http")]
pub use device::HttpDeviceBuilder;
pub use device::{Device, SessionState};
pub use error::{ConnectionError, Error, ParseError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpTransport};
pub use protocol::{Transport, TransportRequest, TransportResponse};
pub use response::{DeviceInfo, Status};
pub use types::{Brightness, FanDirection, FanSpeed, SleepTimer, WindSpeed};
