// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan rotation direction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Direction the fan blades turn.
///
/// # Examples
///
/// ```
/// use fanlight_lib::types::FanDirection;
///
/// let dir: FanDirection = "reverse".parse().unwrap();
/// assert_eq!(dir, FanDirection::Reverse);
/// assert_eq!(FanDirection::Forward.as_str(), "forward");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanDirection {
    /// Downdraft, the summer setting.
    #[default]
    Forward,
    /// Updraft, the winter setting.
    Reverse,
}

impl FanDirection {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

impl fmt::Display for FanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanDirection {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "reverse" => Ok(Self::Reverse),
            _ => Err(ValueError::InvalidDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Forward".parse::<FanDirection>(), Ok(FanDirection::Forward));
        assert_eq!("REVERSE".parse::<FanDirection>(), Ok(FanDirection::Reverse));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(
            "upwards".parse::<FanDirection>(),
            Err(ValueError::InvalidDirection("upwards".to_string()))
        );
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&FanDirection::Reverse).unwrap(),
            "\"reverse\""
        );
        let dir: FanDirection = serde_json::from_str("\"forward\"").unwrap();
        assert_eq!(dir, FanDirection::Forward);
    }

    #[test]
    fn reversed_flips() {
        assert_eq!(FanDirection::Forward.reversed(), FanDirection::Reverse);
        assert_eq!(FanDirection::Reverse.reversed(), FanDirection::Forward);
    }
}
