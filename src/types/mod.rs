// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for fan and light control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so an invalid value never reaches the wire.
//!
//! # Types
//!
//! - [`FanSpeed`] - Fan motor speed step (0-6)
//! - [`WindSpeed`] - Breeze mode intensity (1-3)
//! - [`FanDirection`] - Forward or reverse rotation
//! - [`Brightness`] - Light brightness (0-100%)
//! - [`SleepTimer`] - Scheduled automatic power-off

mod brightness;
mod direction;
mod sleep;
mod speed;

pub use brightness::Brightness;
pub use direction::FanDirection;
pub use sleep::{SLEEP_TIMER_CANCEL, SleepTimer};
pub use speed::{FanSpeed, WindSpeed};

pub(crate) use sleep::timestamp_to_datetime;
