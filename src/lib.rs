// src/lib.rs

//! # Quadcopter Acro Flight-Control Core
//!
//! This crate provides a `no_std`, no-alloc flight-control core for a
//! quad-X multirotor. It turns receiver stick commands and gyro rates into
//! four motor commands at a fixed 400 Hz control rate, behind an arming
//! state machine that forces the motors off and zeroes the controllers
//! whenever the receiver is invalid, the arm switch is down, or the
//! throttle sits at its minimum.
//!
//! The pieces, leaves first:
//!
//! - [`map`]: linear rescaling of receiver pulse widths.
//! - [`pid`]: per-axis PID controllers built on `piddiy`.
//! - [`mixer`]: quad-X motor mixing.
//! - [`arming`]: the arm/disarm rules and their safety actions.
//! - [`scheduler`]: the cooperative loop tying them to the drivers in
//!   [`peripherals`].

#![no_std]
#![deny(missing_docs)]

#[cfg(test)]
extern crate std;

pub mod arming;
pub mod config;
pub mod error;
pub mod map;
pub mod mixer;
pub mod mode;
pub mod number;
pub mod peripherals;
pub mod pid;
pub mod receiver;
pub mod scheduler;

#[doc(inline)]
pub use number::Number;
#[doc(inline)]
pub use scheduler::{ControlLoopState, Iteration, Scheduler};

#[cfg(test)]
mod test_utils;
