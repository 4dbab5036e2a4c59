// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for device JSON payloads.
//!
//! Parsing is a pure function from a response body to either a validated
//! model or a [`ParseError`](crate::error::ParseError); nothing here performs
//! I/O.

mod info;
mod status;

pub use info::DeviceInfo;
pub use status::{Status, StatusPayload};
