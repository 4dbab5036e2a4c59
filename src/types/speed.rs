// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan and breeze speed types.
//!
//! Both types guarantee at construction time that the value lies within the
//! range the device accepts.

use std::fmt;

use crate::error::ValueError;

/// Fan motor speed step (0-6).
///
/// # Examples
///
/// ```
/// use fanlight_lib::types::FanSpeed;
///
/// let speed = FanSpeed::new(3).unwrap();
/// assert_eq!(speed.value(), 3);
///
/// assert_eq!(FanSpeed::MAX.value(), 6);
/// assert!(FanSpeed::new(7).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct FanSpeed(u8);

impl FanSpeed {
    /// Lowest speed step.
    pub const MIN: Self = Self(0);

    /// Highest speed step.
    pub const MAX: Self = Self(6);

    /// Creates a new fan speed.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [0, 6].
    pub fn new(value: i64) -> Result<Self, ValueError> {
        check_range("speed", value, Self::MIN.0, Self::MAX.0).map(Self)
    }

    /// Returns the speed step.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for FanSpeed {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FanSpeed> for u8 {
    fn from(speed: FanSpeed) -> Self {
        speed.0
    }
}

/// Breeze (wind) mode intensity (1-3).
///
/// Only meaningful on devices that report breeze support, see
/// [`Status::has_breeze_mode`](crate::Status::has_breeze_mode).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct WindSpeed(u8);

impl WindSpeed {
    /// Gentlest breeze.
    pub const MIN: Self = Self(1);

    /// Strongest breeze.
    pub const MAX: Self = Self(3);

    /// Creates a new breeze intensity.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [1, 3].
    pub fn new(value: i64) -> Result<Self, ValueError> {
        check_range("wind speed", value, Self::MIN.0, Self::MAX.0).map(Self)
    }

    /// Returns the breeze intensity.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for WindSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for WindSpeed {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WindSpeed> for u8 {
    fn from(speed: WindSpeed) -> Self {
        speed.0
    }
}

/// Checks that `value` lies in `[min, max]` and narrows it to `u8`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn check_range(
    field: &'static str,
    value: i64,
    min: u8,
    max: u8,
) -> Result<u8, ValueError> {
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ValueError::OutOfRange {
            field,
            min: i64::from(min),
            max: i64::from(max),
            actual: value,
        });
    }
    // Safe: bounds checked against u8 limits above
    Ok(value as u8)
}
