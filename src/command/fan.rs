// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan control command.

use chrono::{DateTime, Utc};

use crate::command::{Body, Command, FAN_PATH};
use crate::error::ValueError;
use crate::types::{FanDirection, FanSpeed, SleepTimer, WindSpeed};

/// Command to change the fan's state.
///
/// Every setter is optional; only the arguments that were set end up in the
/// request body. Range checks run when the payload is built, before anything
/// is sent.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use fanlight_lib::command::{Command, FanCommand};
/// use fanlight_lib::types::FanDirection;
///
/// let cmd = FanCommand::new().on(true).speed(6).direction(FanDirection::Reverse);
/// assert_eq!(
///     cmd.payload(Utc::now()).unwrap(),
///     serde_json::json!({"fanOn": true, "fanSpeed": 6, "fanDirection": "reverse"})
/// );
///
/// assert!(FanCommand::new().speed(7).payload(Utc::now()).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanCommand {
    on: Option<bool>,
    speed: Option<i64>,
    direction: Option<FanDirection>,
    sleep: Option<SleepTimer>,
    wind: Option<bool>,
    wind_speed: Option<i64>,
}

impl FanCommand {
    /// Creates an empty command.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns the fan on or off.
    #[must_use]
    pub fn on(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    /// Sets the speed step (0-6).
    #[must_use]
    pub fn speed(mut self, speed: i64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Sets the rotation direction.
    #[must_use]
    pub fn direction(mut self, direction: FanDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Schedules an automatic power-off.
    #[must_use]
    pub fn sleep(mut self, sleep: impl Into<SleepTimer>) -> Self {
        self.sleep = Some(sleep.into());
        self
    }

    /// Turns breeze mode on or off.
    #[must_use]
    pub fn wind(mut self, wind: bool) -> Self {
        self.wind = Some(wind);
        self
    }

    /// Sets the breeze intensity (1-3).
    #[must_use]
    pub fn wind_speed(mut self, wind_speed: i64) -> Self {
        self.wind_speed = Some(wind_speed);
        self
    }

    /// Returns `true` if the command touches breeze mode.
    #[must_use]
    pub fn uses_breeze_mode(&self) -> bool {
        self.wind.is_some() || self.wind_speed.is_some()
    }
}

impl Command for FanCommand {
    fn endpoint(&self) -> &'static str {
        FAN_PATH
    }

    fn payload(&self, now: DateTime<Utc>) -> Result<serde_json::Value, ValueError> {
        let speed = self.speed.map(FanSpeed::new).transpose()?;
        let sleep = self.sleep.map(|s| s.to_timestamp(now)).transpose()?;
        let wind_speed = self.wind_speed.map(WindSpeed::new).transpose()?;

        Ok(Body::default()
            .field("fanOn", self.on)
            .field("fanSpeed", speed.map(|s| s.value()))
            .field("fanDirection", self.direction.map(|d| d.as_str()))
            .field("fanSleepTimer", sleep)
            .field("wind", self.wind)
            .field("windSpeed", wind_speed.map(|s| s.value()))
            .into_value())
    }
}
