// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sleep timer arguments for fan and light commands.
//!
//! The device schedules an automatic power-off at a Unix timestamp. A value
//! of `0` clears any pending timer.
//!
//! How the device combines a new timer with one that is already pending is
//! left to the device; the timestamp is passed through as-is.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::ValueError;

/// Wire value that clears a pending sleep timer.
pub const SLEEP_TIMER_CANCEL: i64 = 0;

/// When a fan or light should switch itself off.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use chrono::{TimeDelta, Utc};
/// use fanlight_lib::types::SleepTimer;
///
/// let now = Utc::now();
///
/// let relative = SleepTimer::In(Duration::from_secs(120));
/// assert_eq!(relative.to_timestamp(now).unwrap(), now.timestamp() + 120);
///
/// let past = SleepTimer::At(now - TimeDelta::minutes(1));
/// assert!(past.to_timestamp(now).is_err());
///
/// assert_eq!(SleepTimer::Cancel.to_timestamp(now).unwrap(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepTimer {
    /// Clear any pending timer.
    Cancel,
    /// Switch off after the given delay. A zero delay clears the timer.
    In(Duration),
    /// Switch off at the given instant, which must not be in the past.
    At(DateTime<Utc>),
}

impl SleepTimer {
    /// Resolves the timer to the Unix timestamp sent to the device.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::SleepInPast` if an absolute instant lies before
    /// `now`, and `ValueError::OutOfRange` if a relative delay does not fit
    /// in a timestamp.
    pub fn to_timestamp(&self, now: DateTime<Utc>) -> Result<i64, ValueError> {
        match self {
            Self::Cancel => Ok(SLEEP_TIMER_CANCEL),
            Self::In(delay) if delay.is_zero() => Ok(SLEEP_TIMER_CANCEL),
            Self::In(delay) => TimeDelta::from_std(*delay)
                .ok()
                .and_then(|delta| now.checked_add_signed(delta))
                .map(|at| at.timestamp())
                .ok_or(ValueError::OutOfRange {
                    field: "sleep",
                    min: 0,
                    max: i64::MAX,
                    actual: i64::try_from(delay.as_secs()).unwrap_or(i64::MAX),
                }),
            Self::At(at) if *at < now => Err(ValueError::SleepInPast(*at)),
            Self::At(at) => Ok(at.timestamp()),
        }
    }
}

impl From<DateTime<Utc>> for SleepTimer {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

impl From<Duration> for SleepTimer {
    fn from(delay: Duration) -> Self {
        Self::In(delay)
    }
}

/// Converts a wire timestamp into an optional instant (`0` means none).
pub(crate) fn timestamp_to_datetime(timestamp: i64) -> Option<DateTime<Utc>> {
    if timestamp <= SLEEP_TIMER_CANCEL {
        None
    } else {
        DateTime::from_timestamp(timestamp, 0)
    }
}
