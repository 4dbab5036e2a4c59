// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static device information parsing.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Static information about the fan: hardware types, identifiers, firmware.
///
/// Unlike [`Status`](crate::Status) this data only changes on firmware
/// updates or re-provisioning. Fields the device omits are empty strings.
///
/// # Examples
///
/// ```
/// use fanlight_lib::response::DeviceInfo;
///
/// let info = DeviceInfo::from_json(r#"{
///     "clientId": "MF_000000000000",
///     "mac": "CC:CC:CC:CC:CC:CC",
///     "fanType": "1818-56",
///     "deviceName": "Fan"
/// }"#).unwrap();
///
/// assert_eq!(info.fan_type, "1818-56");
/// assert_eq!(info.mac_address, "CC:CC:CC:CC:CC:CC");
/// assert!(info.firmware_url.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceInfo {
    /// Cloud client identifier.
    pub client_id: String,

    /// MAC address of the Wi-Fi module.
    #[serde(rename = "mac")]
    pub mac_address: String,

    /// Light kit model.
    pub light_type: String,

    /// Fan model.
    pub fan_type: String,

    /// Fan motor model.
    pub fan_motor_type: String,

    /// Production lot number.
    pub production_lot_number: String,

    /// Product SKU.
    pub product_sku: String,

    /// Account owning the device.
    pub owner: String,

    /// Federated identity of the owner.
    pub federated_identity: String,

    /// User-assigned device name.
    pub device_name: String,

    /// Wi-Fi module firmware version.
    pub firmware_version: String,

    /// Main MCU firmware version.
    pub main_mcu_firmware_version: String,

    /// URL of the pending firmware image, if any.
    pub firmware_url: String,
}

impl DeviceInfo {
    /// Parses an info response body.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the body is not a JSON object or is empty.
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if value.as_object().is_some_and(serde_json::Map::is_empty) {
            return Err(ParseError::EmptyResponse);
        }
        serde_json::from_value(value).map_err(Into::into)
    }

    /// Returns the user-assigned name, or the client id when unnamed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.device_name.is_empty() {
            &self.client_id
        } else {
            &self.device_name
        }
    }
}
