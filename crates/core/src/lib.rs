// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-core: Core library for the Script Jobs (sj) automation service

pub mod macros;

pub mod channel;
pub mod clock;
pub mod introspect;
pub mod output;
pub mod params;

pub use channel::ScriptChannel;
pub use clock::{Clock, FakeClock, SystemClock};
pub use introspect::{introspect, ParseError};
pub use output::{OutputMessage, OutputRelay};
pub use params::{Parameter, ParameterKind, ParameterList, ParameterValue};
