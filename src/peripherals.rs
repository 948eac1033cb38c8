// src/peripherals.rs

//! # Hardware Collaborators
//!
//! Traits for the drivers the control core polls and commands. Drivers
//! live outside this crate; they only need to honour these contracts.

use crate::mixer::MotorCommands;

/// Inertial sensor driver.
pub trait InertialSensor<T> {
    /// Whether a new sample is latched. Reading the sample clears it.
    fn data_ready(&mut self) -> bool;
    /// Raw gyro rates for axes 0, 1 and 2.
    fn read_gyro(&mut self) -> [i16; 3];
    /// Estimated `(roll, pitch)` angles, integrating over `dt` seconds.
    fn read_angles(&mut self, dt: T) -> (T, T);
}

/// Motor output driver.
pub trait MotorOutput<T> {
    /// Applies a command vector. The driver saturates to its drive range.
    fn update(&mut self, motors: &MotorCommands<T>);
    /// Removes every drive signal. Stronger than commanding minimum values.
    fn all_off(&mut self);
}

/// Free-running microsecond counter. Wraps around; callers subtract with
/// wrapping arithmetic.
pub trait Clock {
    /// Current time in microseconds.
    fn now_micros(&mut self) -> u32;
}

/// Ultrasonic range finder trigger.
pub trait Sonar {
    /// Starts a measurement. Fire and forget.
    fn trigger(&mut self);
}

/// Operator feedback shown by the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    /// Valid receiver data with the arm switch in the armed position.
    Armed,
    /// Anything else.
    Disarmed,
}

/// Best-effort status light.
pub trait StatusIndicator {
    /// Displays a state.
    fn show(&mut self, state: IndicatorState);
}

impl Sonar for () {
    fn trigger(&mut self) {}
}

impl StatusIndicator for () {
    fn show(&mut self, _state: IndicatorState) {}
}

/// The set of drivers one control loop runs against.
pub struct Peripherals<R, I, M, C, S = (), L = ()> {
    /// Radio receiver.
    pub receiver: R,
    /// Inertial sensor.
    pub imu: I,
    /// Motor output.
    pub motors: M,
    /// Microsecond clock.
    pub clock: C,
    /// Sonar trigger.
    pub sonar: S,
    /// Status indicator.
    pub indicator: L,
}

impl<R, I, M, C> Peripherals<R, I, M, C> {
    /// Bundles the required drivers, without sonar or indicator.
    pub fn new(receiver: R, imu: I, motors: M, clock: C) -> Self {
        Peripherals {
            receiver,
            imu,
            motors,
            clock,
            sonar: (),
            indicator: (),
        }
    }
}

impl<R, I, M, C, S, L> Peripherals<R, I, M, C, S, L> {
    /// Replaces the sonar trigger.
    pub fn with_sonar<S2: Sonar>(self, sonar: S2) -> Peripherals<R, I, M, C, S2, L> {
        Peripherals {
            receiver: self.receiver,
            imu: self.imu,
            motors: self.motors,
            clock: self.clock,
            sonar,
            indicator: self.indicator,
        }
    }

    /// Replaces the status indicator.
    pub fn with_indicator<L2: StatusIndicator>(self, indicator: L2) -> Peripherals<R, I, M, C, S, L2> {
        Peripherals {
            receiver: self.receiver,
            imu: self.imu,
            motors: self.motors,
            clock: self.clock,
            sonar: self.sonar,
            indicator,
        }
    }
}
