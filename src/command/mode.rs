// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device-wide mode commands: away mode, adaptive learning and reboot.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::command::{ADAPTIVE_LEARNING_PATH, AWAY_PATH, Command, REBOOT_PATH};
use crate::error::ValueError;

/// Command to enable or disable away mode.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use fanlight_lib::command::{AwayCommand, Command};
///
/// let cmd = AwayCommand::new(true);
/// assert_eq!(cmd.payload(Utc::now()).unwrap(), serde_json::json!({"awayModeEnabled": true}));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwayCommand(bool);

impl AwayCommand {
    /// Creates the command.
    #[must_use]
    pub const fn new(on: bool) -> Self {
        Self(on)
    }
}

impl Command for AwayCommand {
    fn endpoint(&self) -> &'static str {
        AWAY_PATH
    }

    fn payload(&self, _now: DateTime<Utc>) -> Result<serde_json::Value, ValueError> {
        Ok(json!({ "awayModeEnabled": self.0 }))
    }
}

/// Command to enable or disable adaptive learning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveLearningCommand(bool);

impl AdaptiveLearningCommand {
    /// Creates the command.
    #[must_use]
    pub const fn new(on: bool) -> Self {
        Self(on)
    }
}

impl Command for AdaptiveLearningCommand {
    fn endpoint(&self) -> &'static str {
        ADAPTIVE_LEARNING_PATH
    }

    fn payload(&self, _now: DateTime<Utc>) -> Result<serde_json::Value, ValueError> {
        Ok(json!({ "adaptiveLearning": self.0 }))
    }
}

/// Command to restart the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebootCommand;

impl Command for RebootCommand {
    fn endpoint(&self) -> &'static str {
        REBOOT_PATH
    }

    fn payload(&self, _now: DateTime<Utc>) -> Result<serde_json::Value, ValueError> {
        Ok(json!({ "reboot": true }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_learning_payload() {
        let body = AdaptiveLearningCommand::new(false)
            .payload(Utc::now())
            .unwrap();
        assert_eq!(body, json!({"adaptiveLearning": false}));
    }

    #[test]
    fn reboot_payload() {
        assert_eq!(RebootCommand.endpoint(), "/api/v1/reboot");
        assert_eq!(
            RebootCommand.payload(Utc::now()).unwrap(),
            json!({"reboot": true})
        );
    }
}
