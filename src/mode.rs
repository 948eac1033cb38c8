// src/mode.rs

//! # Controller Modes
//!
//! Acro mode feeds stick rate commands against gyro rates. Self-level mode
//! holds fixed rest angles against the sensor's angle estimate, keeping rate
//! feedback on yaw. The mode is chosen once at startup and holds the latest
//! measurement between control ticks.

use crate::peripherals::InertialSensor;
use crate::Number;
use num_traits::FromPrimitive;

/// Mode selection made at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeSelect<T> {
    /// Rate control from the gyro.
    Acro,
    /// Attitude hold around `(roll, pitch)` rest angles.
    SelfLevel {
        /// Angles the frame reads when level.
        rest_angles: (T, T),
    },
}

/// Controller mode together with its latest measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlMode<T> {
    /// Rate control.
    Acro {
        /// Latest raw gyro sample.
        gyro_rates: [i16; 3],
    },
    /// Attitude hold.
    SelfLevel {
        /// Latest `(roll, pitch)` estimate.
        angles: (T, T),
        /// Angles the frame reads when level.
        rest_angles: (T, T),
        /// Latest raw gyro sample, used for yaw.
        gyro_rates: [i16; 3],
    },
}

/// Set point and measurement for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTarget<T> {
    /// Desired value.
    pub set_point: T,
    /// Measured value.
    pub measurement: T,
}

/// Set points and measurements for all three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTargets<T> {
    /// Roll axis.
    pub roll: AxisTarget<T>,
    /// Pitch axis.
    pub pitch: AxisTarget<T>,
    /// Yaw axis.
    pub yaw: AxisTarget<T>,
}

impl<T: Number + FromPrimitive> ControlMode<T> {
    /// A mode with zeroed measurements.
    pub fn new(select: ModeSelect<T>) -> Self {
        match select {
            ModeSelect::Acro => ControlMode::Acro { gyro_rates: [0; 3] },
            ModeSelect::SelfLevel { rest_angles } => ControlMode::SelfLevel {
                angles: (T::zero(), T::zero()),
                rest_angles,
                gyro_rates: [0; 3],
            },
        }
    }

    /// Reads a fresh sample from the sensor. `dt` is the time since the
    /// previous sample in seconds.
    pub fn refresh<I: InertialSensor<T> + ?Sized>(&mut self, imu: &mut I, dt: T) {
        match self {
            ControlMode::Acro { gyro_rates } => {
                *gyro_rates = imu.read_gyro();
            }
            ControlMode::SelfLevel {
                angles, gyro_rates, ..
            } => {
                *gyro_rates = imu.read_gyro();
                *angles = imu.read_angles(dt);
            }
        }
    }

    /// Pairs the scaled stick commands with the latest measurements.
    ///
    /// The sensor is mounted rotated: roll is measured on gyro axis 1 and
    /// pitch on gyro axis 0. Returns `None` if a gyro count does not fit `T`.
    pub fn targets(&self, roll_command: T, pitch_command: T, yaw_command: T) -> Option<AxisTargets<T>> {
        match *self {
            ControlMode::Acro { gyro_rates } => Some(AxisTargets {
                roll: AxisTarget {
                    set_point: roll_command,
                    measurement: T::from_i16(gyro_rates[1])?,
                },
                pitch: AxisTarget {
                    set_point: pitch_command,
                    measurement: T::from_i16(gyro_rates[0])?,
                },
                yaw: AxisTarget {
                    set_point: yaw_command,
                    measurement: T::from_i16(gyro_rates[2])?,
                },
            }),
            ControlMode::SelfLevel {
                angles,
                rest_angles,
                gyro_rates,
            } => Some(AxisTargets {
                roll: AxisTarget {
                    set_point: rest_angles.0,
                    measurement: angles.0,
                },
                pitch: AxisTarget {
                    set_point: rest_angles.1,
                    measurement: angles.1,
                },
                yaw: AxisTarget {
                    set_point: yaw_command,
                    measurement: T::from_i16(gyro_rates[2])?,
                },
            }),
        }
    }
}
