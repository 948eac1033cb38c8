// src/pid/rate.rs

//! # Rate-Based PID Compute Callback
//!
//! This module provides the compute function and control data structure
//! driving a `piddiy::PidController` for one axis of the rate loop.

use crate::Number;
use piddiy::PidController;

/// Control data for the rate PID compute callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RateControlData<T> {
    /// The measured value, typically a gyro rate or an estimated angle.
    pub measurement: T,
    /// The time delta since the last computation, in seconds.
    pub dt: T,
    /// Optional symmetric bound on the integral term. `None` leaves the
    /// integral unbounded.
    pub integral_limit: Option<T>,
}

/// Rate-based PID compute callback.
///
/// Returns `(error, integral, derivative)`. A non-positive `dt` counts as no
/// elapsed time: the integral is carried over unchanged and the derivative
/// term is zero.
pub fn compute_rate<T: Number>(
    pid: &mut PidController<T, RateControlData<T>>,
    data: RateControlData<T>,
) -> (T, T, T) {
    let error = pid.set_point - data.measurement;
    if data.dt <= T::zero() {
        return (error, pid.integral, T::zero());
    }

    let mut integral = pid.integral + error * data.dt;
    if let Some(limit) = data.integral_limit {
        integral = integral.clamp_symmetric(limit);
    }
    let derivative = (error - pid.error) / data.dt;

    (error, integral, derivative)
}
