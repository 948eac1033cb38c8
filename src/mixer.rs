// src/mixer.rs

//! # Quad-X Motor Mixer
//!
//! Combines a common throttle with roll, pitch and yaw corrections into the
//! four motor commands of an X frame. No saturation is applied here; the
//! motor output driver limits values before they reach the ESCs.

use crate::Number;

/// Number of motors on a quadcopter.
pub const MOTOR_COUNT: usize = 4;

/// Four motor commands, indexed by [`MotorPosition`].
pub type MotorCommands<T> = [T; MOTOR_COUNT];

/// Physical motor placement on the X frame, seen from above with the nose
/// pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorPosition {
    /// Motor 0.
    BottomRight = 0,
    /// Motor 1.
    TopRight = 1,
    /// Motor 2.
    BottomLeft = 2,
    /// Motor 3.
    TopLeft = 3,
}

impl MotorPosition {
    /// All positions in command vector order.
    pub const ALL: [MotorPosition; MOTOR_COUNT] = [
        MotorPosition::BottomRight,
        MotorPosition::TopRight,
        MotorPosition::BottomLeft,
        MotorPosition::TopLeft,
    ];

    /// Index of this motor in a [`MotorCommands`] vector.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Mixes throttle and axis corrections into motor commands.
///
/// ```text
/// m0 = throttle - roll + pitch - yaw   (bottom right)
/// m1 = throttle - roll - pitch + yaw   (top right)
/// m2 = throttle + roll + pitch + yaw   (bottom left)
/// m3 = throttle + roll - pitch - yaw   (top left)
/// ```
pub fn mix_quad_x<T: Number>(throttle: T, roll: T, pitch: T, yaw: T) -> MotorCommands<T> {
    let mut motors = [throttle; MOTOR_COUNT];

    motors[0] = motors[0] - roll;
    motors[1] = motors[1] - roll;
    motors[2] = motors[2] + roll;
    motors[3] = motors[3] + roll;

    motors[0] = motors[0] + pitch;
    motors[1] = motors[1] - pitch;
    motors[2] = motors[2] + pitch;
    motors[3] = motors[3] - pitch;

    motors[0] = motors[0] - yaw;
    motors[1] = motors[1] + yaw;
    motors[2] = motors[2] + yaw;
    motors[3] = motors[3] - yaw;

    motors
}
