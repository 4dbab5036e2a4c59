// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device status parsing.
//!
//! [`StatusPayload`] mirrors the JSON object the device sends, with every
//! field optional. [`Status`] is the validated snapshot built from it: once
//! constructed, every range invariant holds and the value never changes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::{Brightness, FanDirection, FanSpeed, WindSpeed, timestamp_to_datetime};

/// Raw status object as exchanged with the device.
///
/// Absent fields stay `None`. Serializing skips them, so the same type also
/// describes partial responses.
///
/// # Examples
///
/// ```
/// use fanlight_lib::response::StatusPayload;
///
/// let payload: StatusPayload = serde_json::from_str(r#"{"fanOn": true}"#).unwrap();
/// assert_eq!(payload.fan_on, Some(true));
/// assert!(payload.light_on.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    /// Fan motor power.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fan_on: Option<bool>,

    /// Fan speed step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fan_speed: Option<i64>,

    /// `"forward"` or `"reverse"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fan_direction: Option<String>,

    /// Fan sleep timer as Unix seconds (`0` when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fan_sleep_timer: Option<i64>,

    /// Light power.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_on: Option<bool>,

    /// Light brightness percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_brightness: Option<i64>,

    /// Light color (Kelvin or preset id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_color: Option<u32>,

    /// Light sleep timer as Unix seconds (`0` when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_sleep_timer: Option<i64>,

    /// Away mode flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_mode_enabled: Option<bool>,

    /// Adaptive learning flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptive_learning: Option<bool>,

    /// Breeze mode power; only sent by devices that support it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<bool>,

    /// Breeze mode intensity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<i64>,

    /// Firmware version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,

    /// Network metadata such as SSID and RSSI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_info: Option<BTreeMap<String, String>>,

    /// Cloud client identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl StatusPayload {
    /// Returns `true` if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `true` if every field a full report must carry is present.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.fan_on.is_some()
            && self.fan_speed.is_some()
            && self.light_on.is_some()
            && self.light_brightness.is_some()
    }

    /// Fills every absent field from `base`.
    #[must_use]
    pub fn overlay(self, base: Self) -> Self {
        Self {
            fan_on: self.fan_on.or(base.fan_on),
            fan_speed: self.fan_speed.or(base.fan_speed),
            fan_direction: self.fan_direction.or(base.fan_direction),
            fan_sleep_timer: self.fan_sleep_timer.or(base.fan_sleep_timer),
            light_on: self.light_on.or(base.light_on),
            light_brightness: self.light_brightness.or(base.light_brightness),
            light_color: self.light_color.or(base.light_color),
            light_sleep_timer: self.light_sleep_timer.or(base.light_sleep_timer),
            away_mode_enabled: self.away_mode_enabled.or(base.away_mode_enabled),
            adaptive_learning: self.adaptive_learning.or(base.adaptive_learning),
            wind: self.wind.or(base.wind),
            wind_speed: self.wind_speed.or(base.wind_speed),
            firmware_version: self.firmware_version.or(base.firmware_version),
            network_info: self.network_info.or(base.network_info),
            client_id: self.client_id.or(base.client_id),
        }
    }
}

/// Snapshot of everything the device reported on its last successful query.
///
/// A `Status` is only ever produced by validating a device payload, so its
/// speed and brightness are always within range. It has no setters; a newer
/// report replaces the whole snapshot.
///
/// # Examples
///
/// ```
/// use fanlight_lib::Status;
///
/// let status = Status::from_json(r#"{
///     "fanOn": true,
///     "fanSpeed": 3,
///     "fanDirection": "forward",
///     "lightOn": false,
///     "lightBrightness": 50
/// }"#).unwrap();
///
/// assert!(status.fan_on());
/// assert_eq!(status.fan_speed().value(), 3);
/// assert!(!status.has_breeze_mode());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StatusPayload", into = "StatusPayload")]
pub struct Status {
    fan_on: bool,
    fan_speed: FanSpeed,
    fan_direction: FanDirection,
    fan_sleep_timer: Option<DateTime<Utc>>,
    light_on: bool,
    light_brightness: Brightness,
    light_color: Option<u32>,
    light_sleep_timer: Option<DateTime<Utc>>,
    away_mode_on: bool,
    adaptive_learning_on: bool,
    wind_on: Option<bool>,
    wind_speed: Option<WindSpeed>,
    firmware_version: String,
    network_info: BTreeMap<String, String>,
    client_id: String,
}

impl Status {
    /// Parses a full status report.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the body is not JSON, is an empty object,
    /// lacks a required field, or carries an out-of-range value.
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        let payload: StatusPayload = serde_json::from_str(body)?;
        Self::from_payload(payload)
    }

    /// Validates a full status payload.
    ///
    /// `fanOn`, `fanSpeed`, `lightOn` and `lightBrightness` are required; the
    /// remaining fields fall back to their idle defaults.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the payload is empty, incomplete, or out of range.
    pub fn from_payload(payload: StatusPayload) -> Result<Self, ParseError> {
        if payload.is_empty() {
            return Err(ParseError::EmptyResponse);
        }

        let fan_speed = payload
            .fan_speed
            .ok_or(ParseError::MissingField("fanSpeed"))?;
        let light_brightness = payload
            .light_brightness
            .ok_or(ParseError::MissingField("lightBrightness"))?;

        let fan_direction: FanDirection = match payload.fan_direction.as_deref() {
            Some(raw) => raw.parse().map_err(|e| invalid("fanDirection", &e))?,
            None => FanDirection::default(),
        };

        let wind_speed = payload
            .wind_speed
            .map(WindSpeed::new)
            .transpose()
            .map_err(|e| invalid("windSpeed", &e))?;

        Ok(Self {
            fan_on: payload.fan_on.ok_or(ParseError::MissingField("fanOn"))?,
            fan_speed: FanSpeed::new(fan_speed).map_err(|e| invalid("fanSpeed", &e))?,
            fan_direction,
            fan_sleep_timer: payload.fan_sleep_timer.and_then(timestamp_to_datetime),
            light_on: payload.light_on.ok_or(ParseError::MissingField("lightOn"))?,
            light_brightness: Brightness::new(light_brightness)
                .map_err(|e| invalid("lightBrightness", &e))?,
            light_color: payload.light_color,
            light_sleep_timer: payload.light_sleep_timer.and_then(timestamp_to_datetime),
            away_mode_on: payload.away_mode_enabled.unwrap_or(false),
            adaptive_learning_on: payload.adaptive_learning.unwrap_or(false),
            wind_on: payload.wind,
            wind_speed,
            firmware_version: payload.firmware_version.unwrap_or_default(),
            network_info: payload.network_info.unwrap_or_default(),
            client_id: payload.client_id.unwrap_or_default(),
        })
    }

    /// Builds the snapshot that follows a command response.
    ///
    /// A full report (one carrying `fanOn`, `fanSpeed`, `lightOn` and
    /// `lightBrightness`) replaces the snapshot outright. In a partial report,
    /// fields missing from `body` keep their value from `self` and the merged
    /// result is validated again. `self` is not modified.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the body is not JSON, is an empty object, or
    /// carries an out-of-range value.
    pub fn merge_json(&self, body: &str) -> Result<Self, ParseError> {
        let payload: StatusPayload = serde_json::from_str(body)?;
        if payload.is_empty() {
            return Err(ParseError::EmptyResponse);
        }
        if payload.is_full() {
            return Self::from_payload(payload);
        }
        Self::from_payload(payload.overlay(self.to_payload()))
    }

    /// Converts the snapshot back to its wire representation.
    #[must_use]
    pub fn to_payload(&self) -> StatusPayload {
        StatusPayload {
            fan_on: Some(self.fan_on),
            fan_speed: Some(i64::from(self.fan_speed.value())),
            fan_direction: Some(self.fan_direction.as_str().to_string()),
            fan_sleep_timer: Some(self.fan_sleep_timer.map_or(0, |t| t.timestamp())),
            light_on: Some(self.light_on),
            light_brightness: Some(i64::from(self.light_brightness.value())),
            light_color: self.light_color,
            light_sleep_timer: Some(self.light_sleep_timer.map_or(0, |t| t.timestamp())),
            away_mode_enabled: Some(self.away_mode_on),
            adaptive_learning: Some(self.adaptive_learning_on),
            wind: self.wind_on,
            wind_speed: self.wind_speed.map(|s| i64::from(s.value())),
            firmware_version: Some(self.firmware_version.clone()),
            network_info: Some(self.network_info.clone()),
            client_id: Some(self.client_id.clone()),
        }
    }

    /// Serializes the snapshot to the device's JSON shape.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<serde_json::Value, ParseError> {
        Ok(serde_json::to_value(self.to_payload())?)
    }

    // ========== Fan ==========

    /// Returns whether the fan motor is on.
    #[must_use]
    pub fn fan_on(&self) -> bool {
        self.fan_on
    }

    /// Returns the fan speed step.
    #[must_use]
    pub fn fan_speed(&self) -> FanSpeed {
        self.fan_speed
    }

    /// Returns the fan rotation direction.
    #[must_use]
    pub fn fan_direction(&self) -> FanDirection {
        self.fan_direction
    }

    /// Returns when the fan is scheduled to switch off.
    #[must_use]
    pub fn fan_sleep_timer(&self) -> Option<DateTime<Utc>> {
        self.fan_sleep_timer
    }

    /// Returns `true` if the device exposes breeze mode.
    #[must_use]
    pub fn has_breeze_mode(&self) -> bool {
        self.wind_on.is_some()
    }

    /// Returns the breeze mode power, or `None` without breeze support.
    #[must_use]
    pub fn wind_on(&self) -> Option<bool> {
        self.wind_on
    }

    /// Returns the breeze intensity, if reported.
    #[must_use]
    pub fn wind_speed(&self) -> Option<WindSpeed> {
        self.wind_speed
    }

    // ========== Light ==========

    /// Returns whether the light is on.
    #[must_use]
    pub fn light_on(&self) -> bool {
        self.light_on
    }

    /// Returns the light brightness.
    #[must_use]
    pub fn light_brightness(&self) -> Brightness {
        self.light_brightness
    }

    /// Returns the light color, if the device reports one.
    #[must_use]
    pub fn light_color(&self) -> Option<u32> {
        self.light_color
    }

    /// Returns when the light is scheduled to switch off.
    #[must_use]
    pub fn light_sleep_timer(&self) -> Option<DateTime<Utc>> {
        self.light_sleep_timer
    }

    // ========== Device ==========

    /// Returns the earliest pending sleep transition across fan and light.
    #[must_use]
    pub fn sleep_timer(&self) -> Option<DateTime<Utc>> {
        match (self.fan_sleep_timer, self.light_sleep_timer) {
            (Some(fan), Some(light)) => Some(fan.min(light)),
            (fan, light) => fan.or(light),
        }
    }

    /// Returns whether away mode is enabled.
    #[must_use]
    pub fn away_mode_on(&self) -> bool {
        self.away_mode_on
    }

    /// Returns whether adaptive learning is enabled.
    #[must_use]
    pub fn adaptive_learning_on(&self) -> bool {
        self.adaptive_learning_on
    }

    /// Returns the firmware version, empty if not reported.
    #[must_use]
    pub fn firmware_version(&self) -> &str {
        &self.firmware_version
    }

    /// Returns network metadata (SSID, RSSI, ...).
    #[must_use]
    pub fn network_info(&self) -> &BTreeMap<String, String> {
        &self.network_info
    }

    /// Returns the cloud client identifier, empty if not reported.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns `true` if neither the fan nor the light is on.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.fan_on && !self.light_on
    }
}

impl TryFrom<StatusPayload> for Status {
    type Error = ParseError;

    fn try_from(payload: StatusPayload) -> Result<Self, Self::Error> {
        Self::from_payload(payload)
    }
}

impl From<Status> for StatusPayload {
    fn from(status: Status) -> Self {
        status.to_payload()
    }
}

fn invalid(field: &'static str, err: &impl std::fmt::Display) -> ParseError {
    ParseError::InvalidValue {
        field,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn basic_response() -> serde_json::Value {
        json!({
            "adaptiveLearning": false,
            "awayModeEnabled": false,
            "clientId": "MF_000000000000",
            "fanDirection": "forward",
            "fanOn": false,
            "fanSleepTimer": 0,
            "fanSpeed": 3,
            "lightBrightness": 50,
            "lightOn": false,
            "lightSleepTimer": 0,
            "firmwareVersion": "01.03.0025",
            "networkInfo": {"ssid": "home", "rssi": "-61"},
            "schedule": ""
        })
    }

    #[test]
    fn parse_full_status() {
        let status = Status::from_json(&basic_response().to_string()).unwrap();
        assert!(!status.fan_on());
        assert_eq!(status.fan_speed().value(), 3);
        assert_eq!(status.fan_direction(), FanDirection::Forward);
        assert_eq!(status.light_brightness().value(), 50);
        assert!(status.fan_sleep_timer().is_none());
        assert!(status.sleep_timer().is_none());
        assert_eq!(status.firmware_version(), "01.03.0025");
        assert_eq!(status.network_info().get("ssid").map(String::as_str), Some("home"));
        assert_eq!(status.client_id(), "MF_000000000000");
        assert!(status.is_idle());
    }

    #[test]
    fn parse_breeze_mode() {
        let mut body = basic_response();
        body["wind"] = json!(false);
        body["windSpeed"] = json!(2);
        let status = Status::from_json(&body.to_string()).unwrap();
        assert!(status.has_breeze_mode());
        assert_eq!(status.wind_on(), Some(false));
        assert_eq!(status.wind_speed().map(|s| s.value()), Some(2));
    }

    #[test]
    fn empty_object_is_rejected() {
        assert!(matches!(
            Status::from_json("{}"),
            Err(ParseError::EmptyResponse)
        ));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let mut body = basic_response();
        body.as_object_mut().unwrap().remove("fanOn");
        assert!(matches!(
            Status::from_json(&body.to_string()),
            Err(ParseError::MissingField("fanOn"))
        ));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut body = basic_response();
        body["lightBrightness"] = json!(101);
        assert!(matches!(
            Status::from_json(&body.to_string()),
            Err(ParseError::InvalidValue {
                field: "lightBrightness",
                ..
            })
        ));

        let mut body = basic_response();
        body["fanSpeed"] = json!(7);
        assert!(matches!(
            Status::from_json(&body.to_string()),
            Err(ParseError::InvalidValue {
                field: "fanSpeed",
                ..
            })
        ));
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let mut body = basic_response();
        body["fanDirection"] = json!("upwards");
        assert!(matches!(
            Status::from_json(&body.to_string()),
            Err(ParseError::InvalidValue {
                field: "fanDirection",
                ..
            })
        ));
    }

    #[test]
    fn not_json_is_rejected() {
        assert!(matches!(
            Status::from_json("error"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let mut body = basic_response();
        body["lightColor"] = json!(2700);
        body["lightSleepTimer"] = json!(1_900_000_000);
        body["wind"] = json!(true);
        body["windSpeed"] = json!(3);
        let status = Status::from_json(&body.to_string()).unwrap();

        let wire = status.to_json().unwrap();
        let reparsed = Status::from_json(&wire.to_string()).unwrap();
        assert_eq!(reparsed, status);

        for key in [
            "fanOn",
            "fanSpeed",
            "fanDirection",
            "lightOn",
            "lightBrightness",
            "lightColor",
            "lightSleepTimer",
            "wind",
            "windSpeed",
            "firmwareVersion",
        ] {
            assert_eq!(wire[key], body[key], "field {key}");
        }
    }

    #[test]
    fn merge_keeps_absent_fields() {
        let status = Status::from_json(&basic_response().to_string()).unwrap();
        let merged = status.merge_json(r#"{"lightOn": true}"#).unwrap();
        assert!(merged.light_on());
        assert_eq!(merged.fan_speed(), status.fan_speed());
        assert_eq!(merged.firmware_version(), "01.03.0025");
        // the receiver is untouched
        assert!(!status.light_on());
    }

    #[test]
    fn full_report_replaces_snapshot() {
        let mut body = basic_response();
        body["lightColor"] = json!(2700);
        body["lightSleepTimer"] = json!(1_900_000_000);
        body["wind"] = json!(false);
        body["windSpeed"] = json!(2);
        let status = Status::from_json(&body.to_string()).unwrap();

        let full = r#"{"fanOn": true, "fanSpeed": 3, "lightOn": true, "lightBrightness": 50}"#;
        let replaced = status.merge_json(full).unwrap();

        assert_eq!(replaced, Status::from_json(full).unwrap());
        assert_eq!(replaced.light_color(), None);
        assert_eq!(replaced.light_sleep_timer(), None);
        assert!(!replaced.has_breeze_mode());
    }

    #[test]
    fn merge_validates_result() {
        let status = Status::from_json(&basic_response().to_string()).unwrap();
        assert!(status.merge_json(r#"{"fanSpeed": 42}"#).is_err());
        assert!(matches!(
            status.merge_json("{}"),
            Err(ParseError::EmptyResponse)
        ));
    }

    #[test]
    fn sleep_timer_is_earliest() {
        let mut body = basic_response();
        body["fanSleepTimer"] = json!(1_900_000_100);
        body["lightSleepTimer"] = json!(1_900_000_000);
        let status = Status::from_json(&body.to_string()).unwrap();
        assert_eq!(
            status.sleep_timer().map(|t| t.timestamp()),
            Some(1_900_000_000)
        );
    }

    #[test]
    fn serde_goes_through_validation() {
        let status: Status = serde_json::from_value(basic_response()).unwrap();
        assert_eq!(status.fan_speed().value(), 3);
        assert!(serde_json::from_value::<Status>(json!({"fanOn": true})).is_err());
    }
}
