// src/pid/axis.rs

//! # Per-Axis PID Controller
//!
//! One independent controller per axis (roll, pitch, yaw). Gains are set
//! once at construction; the integrated error and last error evolve on
//! every update and are zeroed by [`AxisPid::reset`].

use crate::error::{Error, ErrorKind, Result};
use crate::pid::{compute_rate, RateControlData};
use crate::Number;
use piddiy::PidController;

/// Rotation axes, each with its own controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Roll.
    Roll = 0,
    /// Pitch.
    Pitch = 1,
    /// Yaw.
    Yaw = 2,
}

impl Axis {
    /// All axes in controller array order.
    pub const ALL: [Axis; 3] = [Axis::Roll, Axis::Pitch, Axis::Yaw];
}

/// Proportional, integral and derivative gains.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PidGains<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Derivative gain.
    pub kd: T,
}

impl<T: Number> PidGains<T> {
    /// Creates a gain set.
    pub fn new(kp: T, ki: T, kd: T) -> Self {
        Self { kp, ki, kd }
    }

    /// Returns a copy with each gain multiplied by its scale factor.
    pub fn scaled(self, kp_scale: T, ki_scale: T, kd_scale: T) -> Self {
        Self {
            kp: self.kp * kp_scale,
            ki: self.ki * ki_scale,
            kd: self.kd * kd_scale,
        }
    }
}

/// PID controller for a single axis.
pub struct AxisPid<T: Number> {
    pid: PidController<T, RateControlData<T>>,
    integral_limit: Option<T>,
    output_limit: Option<T>,
}

impl<T: Number> AxisPid<T> {
    /// Creates an unbounded controller with the given gains and zeroed state.
    pub fn new(gains: PidGains<T>) -> Self {
        Self::with_limits(gains, None, None)
    }

    /// Creates a controller with optional symmetric bounds on the integral
    /// and on the output.
    pub fn with_limits(gains: PidGains<T>, integral_limit: Option<T>, output_limit: Option<T>) -> Self {
        let mut pid = PidController::new();
        pid.compute_fn(compute_rate)
            .set_point(T::zero())
            .kp(gains.kp)
            .ki(gains.ki)
            .kd(gains.kd);

        AxisPid {
            pid,
            integral_limit,
            output_limit,
        }
    }

    /// Creates an independent controller whose gains are `base`'s gains
    /// scaled per term. Limits are carried over, state starts at zero, and
    /// the two controllers share nothing afterwards.
    pub fn with_scaled_gains(base: &Self, kp_scale: T, ki_scale: T, kd_scale: T) -> Self {
        Self::with_limits(
            base.gains().scaled(kp_scale, ki_scale, kd_scale),
            base.integral_limit,
            base.output_limit,
        )
    }

    /// The configured gains.
    pub fn gains(&self) -> PidGains<T> {
        PidGains {
            kp: self.pid.kp,
            ki: self.pid.ki,
            kd: self.pid.kd,
        }
    }

    /// Accumulated `error * dt` since the last reset.
    pub fn integrated_error(&self) -> T {
        self.pid.integral
    }

    /// Error seen by the previous update.
    pub fn last_error(&self) -> T {
        self.pid.error
    }

    /// Runs one PID step and returns the correction output.
    ///
    /// A non-positive `dt` is treated as zero elapsed time: nothing is
    /// integrated and the derivative term is zero.
    pub fn update(&mut self, set_point: T, measurement: T, dt: T) -> T {
        if dt <= T::zero() {
            log::warn!("{}", Error::new(ErrorKind::InvalidTiming, "pid dt is not positive"));
        }

        self.pid.set_point(set_point);
        let output = self.pid.compute(RateControlData {
            measurement,
            dt,
            integral_limit: self.integral_limit,
        });

        match self.output_limit {
            Some(limit) => output.clamp_symmetric(limit),
            None => output,
        }
    }

    /// Like [`AxisPid::update`], but rejects a non-positive `dt` with
    /// [`ErrorKind::InvalidTiming`] and leaves the state untouched.
    pub fn try_update(&mut self, set_point: T, measurement: T, dt: T) -> Result<T> {
        if dt <= T::zero() {
            return Err(Error::new(ErrorKind::InvalidTiming, "pid dt is not positive"));
        }
        Ok(self.update(set_point, measurement, dt))
    }

    /// Zeroes the integrated error and the last error.
    pub fn reset(&mut self) {
        self.pid.integral = T::zero();
        self.pid.error = T::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn acro_gains() -> PidGains<f32> {
        PidGains::new(0.012, 0.050, 0.0)
    }

    /// Test that a controller at its set point stays at zero output.
    #[test]
    fn test_axis_pid_zero_error_stays_zero() {
        let mut pid = AxisPid::new(PidGains::new(1.3, 0.7, 0.2));
        for _ in 0..1000 {
            let output = pid.update(42.0, 42.0, 0.0025);
            assert_eq!(0.0, output);
        }
        assert_eq!(0.0, pid.integrated_error());
        assert_eq!(0.0, pid.last_error());
    }

    /// Test the proportional, integral and derivative terms of one update.
    #[test]
    fn test_axis_pid_update_terms() {
        let mut pid = AxisPid::new(PidGains::new(2.0, 0.5, 0.1));
        let output = pid.update(10.0, 6.0, 0.5);

        // error 4, integral 2, derivative 8
        assert!(value_close(4.0, pid.last_error()));
        assert!(value_close(2.0, pid.integrated_error()));
        assert!(value_close(2.0 * 4.0 + 0.5 * 2.0 + 0.1 * 8.0, output));

        let output = pid.update(10.0, 8.0, 0.5);
        // error 2, integral 3, derivative -4
        assert!(value_close(3.0, pid.integrated_error()));
        assert!(value_close(2.0 * 2.0 + 0.5 * 3.0 - 0.1 * 4.0, output));
    }

    /// Test that reset clears the integral and last error.
    #[test]
    fn test_axis_pid_reset_from_any_state() {
        let mut pid = AxisPid::new(acro_gains());
        for step in 0..50 {
            let _ = pid.update(300.0, step as f32, 0.0025);
        }
        assert!(value_not_close(0.0, pid.integrated_error()));

        pid.reset();
        assert_eq!(0.0, pid.integrated_error());
        assert_eq!(0.0, pid.last_error());

        pid.reset();
        assert_eq!(0.0, pid.integrated_error());
        assert_eq!(0.0, pid.last_error());
    }

    /// Test that zero elapsed time produces no derivative kick.
    #[test]
    fn test_axis_pid_zero_dt_has_no_derivative_kick() {
        let mut pid = AxisPid::new(PidGains::new(1.0, 1.0, 1.0));
        let output = pid.update(5.0, 0.0, 0.0);
        assert!(value_close(5.0, output), "Only the proportional term should act.");
        assert_eq!(0.0, pid.integrated_error());
        assert!(value_close(5.0, pid.last_error()));
    }

    /// Test that non-positive dt is reported as invalid timing.
    #[test]
    fn test_axis_pid_try_update_rejects_bad_timing() {
        let mut pid = AxisPid::new(PidGains::new(1.0, 1.0, 1.0));
        let err = pid.try_update(5.0, 0.0, 0.0).unwrap_err();
        assert_eq!(ErrorKind::InvalidTiming, err.kind());
        assert_eq!(0.0, pid.last_error());

        let output = pid.try_update(5.0, 0.0, 1.0).unwrap();
        assert!(value_close(15.0, output));
    }

    /// Test that scaled controllers keep their own state.
    #[test]
    fn test_axis_pid_scaled_gains_are_independent() {
        let mut roll = AxisPid::new(acro_gains());
        let yaw = AxisPid::with_scaled_gains(&roll, 3.0, 3.5, 2.0);

        assert!(value_close(0.036, yaw.gains().kp));
        assert!(value_close(0.175, yaw.gains().ki));
        assert_eq!(0.0, yaw.gains().kd);

        let _ = roll.update(100.0, 0.0, 0.01);
        assert!(value_not_close(0.0, roll.integrated_error()));
        assert_eq!(0.0, yaw.integrated_error());
        assert_eq!(acro_gains(), roll.gains());
    }

    /// Test the optional integral and output bounds.
    #[test]
    fn test_axis_pid_limits() {
        let mut pid = AxisPid::with_limits(PidGains::new(1.0, 1.0, 0.0), Some(2.0), Some(5.0));
        for _ in 0..10 {
            let _ = pid.update(100.0, 0.0, 1.0);
        }
        assert!(value_close(2.0, pid.integrated_error()));
        assert!(value_close(5.0, pid.update(100.0, 0.0, 1.0)));
        assert!(value_close(-5.0, pid.update(-100.0, 0.0, 1.0)));
    }
}
