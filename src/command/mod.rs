// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device command definitions.
//!
//! Each command knows the endpoint it is posted to and how to turn its
//! arguments into a JSON body. Arguments the caller did not set are left out
//! of the body entirely, so the device keeps its own value for them.
//!
//! # Available Commands
//!
//! | Command Type | Endpoint | Example |
//! |-------------|----------|---------|
//! | [`FanCommand`] | `/api/v1/fan` | On, speed 3, reverse |
//! | [`LightCommand`] | `/api/v1/light` | On, 50%, off in 2 minutes |
//! | [`AwayCommand`] | `/api/v1/away` | Enable away mode |
//! | [`AdaptiveLearningCommand`] | `/api/v1/adaptive-learning` | Disable learning |
//! | [`RebootCommand`] | `/api/v1/reboot` | Restart the device |
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use fanlight_lib::command::{Command, LightCommand};
//!
//! let cmd = LightCommand::new().on(true).brightness(50);
//! assert_eq!(cmd.endpoint(), "/api/v1/light");
//! assert_eq!(
//!     cmd.payload(Utc::now()).unwrap(),
//!     serde_json::json!({"lightOn": true, "lightBrightness": 50})
//! );
//! ```

mod fan;
mod light;
mod mode;

pub use fan::FanCommand;
pub use light::LightCommand;
pub use mode::{AdaptiveLearningCommand, AwayCommand, RebootCommand};

use chrono::{DateTime, Utc};

use crate::error::ValueError;
use crate::protocol::TransportRequest;

/// Path of the full status query.
pub const STATUS_PATH: &str = "/api/v1/status";
/// Path of the static device information query.
pub const INFO_PATH: &str = "/api/v1/info";
/// Path of fan commands.
pub const FAN_PATH: &str = "/api/v1/fan";
/// Path of light commands.
pub const LIGHT_PATH: &str = "/api/v1/light";
/// Path of the away mode command.
pub const AWAY_PATH: &str = "/api/v1/away";
/// Path of the adaptive learning command.
pub const ADAPTIVE_LEARNING_PATH: &str = "/api/v1/adaptive-learning";
/// Path of the reboot command.
pub const REBOOT_PATH: &str = "/api/v1/reboot";

/// A state-changing request that can be posted to the device.
pub trait Command {
    /// Returns the path the command is posted to.
    fn endpoint(&self) -> &'static str;

    /// Validates the arguments and builds the JSON body.
    ///
    /// `now` anchors relative sleep timers and the "not in the past" check.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if any argument is outside its domain.
    fn payload(&self, now: DateTime<Utc>) -> Result<serde_json::Value, ValueError>;

    /// Builds the full transport request.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if any argument is outside its domain.
    fn to_request(&self, now: DateTime<Utc>) -> Result<TransportRequest, ValueError> {
        Ok(TransportRequest::post(self.endpoint(), self.payload(now)?))
    }
}

/// JSON object body that only receives the arguments that were set.
#[derive(Debug, Default)]
pub(crate) struct Body(serde_json::Map<String, serde_json::Value>);

impl Body {
    /// Adds `key` when `value` is set.
    pub(crate) fn field(mut self, key: &str, value: Option<impl Into<serde_json::Value>>) -> Self {
        if let Some(value) = value {
            self.0.insert(key.to_string(), value.into());
        }
        self
    }

    pub(crate) fn into_value(self) -> serde_json::Value {
        serde_json::Value::Object(self.0)
    }
}
