// src/pid.rs

//! # PID Control Module
//!
//! This module provides the compute callback and the per-axis controller
//! used for rate-based PID (Proportional-Integral-Derivative) control.

pub mod axis;
pub use axis::*;
pub mod rate;
pub use rate::*;
