// src/config.rs

//! Startup configuration for the control loop: tuning, stick scaling,
//! receiver limits and loop timing. Built once, never changed by the loop.

use crate::arming::ARM_THROTTLE_MARGIN;
use crate::error::{Error, ErrorKind, Result};
use crate::mode::ModeSelect;
use crate::pid::PidGains;
use crate::receiver::RxLimits;
use crate::Number;

/// Control period in microseconds (400 Hz).
pub const CONTROL_PERIOD_US: u32 = 2500;

/// Configuration for the control loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightControlConfig<T: Number> {
    /// Roll gains. Pitch and yaw are derived from these.
    pub roll_gains: PidGains<T>,
    /// `(kp, ki, kd)` factors turning roll gains into pitch gains.
    pub pitch_gain_scale: (T, T, T),
    /// `(kp, ki, kd)` factors turning roll gains into yaw gains.
    pub yaw_gain_scale: (T, T, T),
    /// Multiplier from roll/pitch stick percent to set point.
    pub stick_scale_roll_pitch: T,
    /// Multiplier from yaw stick percent to set point.
    pub stick_scale_yaw: T,
    /// Sticks and throttle map onto `[-stick_range, stick_range]`.
    pub stick_range: T,
    /// Receiver pulse-width bounds.
    pub rx_limits: RxLimits,
    /// Minimum time between control ticks, in microseconds.
    pub control_period_us: u32,
    /// Throttle travel above the minimum required to arm.
    pub arm_throttle_margin: u16,
    /// Optional symmetric bound on each integrated error.
    ///
    /// The control timer does not advance while disarmed, so the first tick
    /// after arming integrates over the whole disarmed spell. Set a bound to
    /// cap that step.
    pub integral_limit: Option<T>,
    /// Optional symmetric bound on each PID output.
    pub output_limit: Option<T>,
    /// Controller mode.
    pub mode: ModeSelect<T>,
}

impl<T: Number> FlightControlConfig<T> {
    /// Checks the settings the loop cannot recover from at run time.
    pub fn validate(&self) -> Result<()> {
        if !self.rx_limits.is_ordered() {
            return Err(Error::new(ErrorKind::InvalidRange, "receiver limits must satisfy min < mid < max"));
        }
        if self.stick_range <= T::zero() {
            return Err(Error::new(ErrorKind::InvalidRange, "stick range must be positive"));
        }
        Ok(())
    }
}

impl FlightControlConfig<f32> {
    /// Tuning for acro (rate) mode.
    ///
    /// Example Usage
    /// ```
    /// use quad_acro_flight_core::config::FlightControlConfig;
    ///
    /// let mut config = FlightControlConfig::acro();
    ///
    /// // Stiffer yaw and a bounded integrator.
    /// config.yaw_gain_scale = (4.0, 3.5, 2.0);
    /// config.integral_limit = Some(400.0);
    ///
    /// assert_eq!(config.control_period_us, 2500);
    /// ```
    pub fn acro() -> Self {
        Self {
            roll_gains: PidGains::new(0.012, 0.050, 0.0),
            pitch_gain_scale: (1.0, 1.0, 1.0),
            yaw_gain_scale: (3.0, 3.5, 2.0),
            stick_scale_roll_pitch: 15.0,
            stick_scale_yaw: 30.0,
            stick_range: 100.0,
            rx_limits: RxLimits::new(),
            control_period_us: CONTROL_PERIOD_US,
            arm_throttle_margin: ARM_THROTTLE_MARGIN,
            integral_limit: None,
            output_limit: None,
            mode: ModeSelect::Acro,
        }
    }

    /// Tuning for self-level mode with the frame's measured rest angles.
    pub fn self_level() -> Self {
        Self {
            roll_gains: PidGains::new(1.75, 1.0, 0.0),
            mode: ModeSelect::SelfLevel {
                rest_angles: (1.67, -2.55),
            },
            ..Self::acro()
        }
    }
}

impl Default for FlightControlConfig<f32> {
    fn default() -> Self {
        Self::acro()
    }
}
