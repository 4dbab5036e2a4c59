// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light control command.

use chrono::{DateTime, Utc};

use crate::command::{Body, Command, LIGHT_PATH};
use crate::error::ValueError;
use crate::types::{Brightness, SleepTimer};

/// Command to change the light's state.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use chrono::Utc;
/// use fanlight_lib::command::{Command, LightCommand};
///
/// let now = Utc::now();
/// let cmd = LightCommand::new().brightness(80).sleep(Duration::from_secs(60));
/// let body = cmd.payload(now).unwrap();
/// assert_eq!(body["lightBrightness"], 80);
/// assert_eq!(body["lightSleepTimer"], now.timestamp() + 60);
/// assert!(body.get("lightOn").is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightCommand {
    on: Option<bool>,
    brightness: Option<i64>,
    color: Option<u32>,
    sleep: Option<SleepTimer>,
}

impl LightCommand {
    /// Creates an empty command.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns the light on or off.
    #[must_use]
    pub fn on(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    /// Sets the brightness percentage (0-100).
    #[must_use]
    pub fn brightness(mut self, brightness: i64) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Sets the color (Kelvin or preset id, device-defined).
    #[must_use]
    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Schedules an automatic power-off.
    #[must_use]
    pub fn sleep(mut self, sleep: impl Into<SleepTimer>) -> Self {
        self.sleep = Some(sleep.into());
        self
    }
}

impl Command for LightCommand {
    fn endpoint(&self) -> &'static str {
        LIGHT_PATH
    }

    fn payload(&self, now: DateTime<Utc>) -> Result<serde_json::Value, ValueError> {
        let brightness = self.brightness.map(Brightness::new).transpose()?;
        let sleep = self.sleep.map(|s| s.to_timestamp(now)).transpose()?;

        Ok(Body::default()
            .field("lightOn", self.on)
            .field("lightBrightness", brightness.map(|b| b.value()))
            .field("lightColor", self.color)
            .field("lightSleepTimer", sleep)
            .into_value())
    }
}
