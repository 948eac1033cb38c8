// src/test_utils.rs

//! This module contains utilities for testing: float comparisons and
//! scripted stand-ins for the hardware collaborators.

use crate::mixer::MotorCommands;
use crate::peripherals::{Clock, IndicatorState, InertialSensor, MotorOutput, Sonar, StatusIndicator};
use crate::receiver::{Channel, Receiver, ReceiverSnapshot, RX_MAX_INPUT, RX_MID_INPUT};
use core::cell::Cell;
use std::vec::Vec;

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f32 = 1e-5;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
pub fn value_close(target: f32, value: f32) -> bool {
    (target - value).abs() < TEST_TOLERANCE
}

/// Checks if two floating point numbers are not close enough to be
/// considered equal.
pub fn value_not_close(target: f32, value: f32) -> bool {
    TEST_TOLERANCE <= (target - value).abs()
}

/// Checks if each of the four motor commands is close enough to be
/// considered equal.
pub fn vector4_close(target: MotorCommands<f32>, value: MotorCommands<f32>) -> bool {
    target
        .iter()
        .zip(value.iter())
        .all(|(target, value)| value_close(*target, *value))
}

/// A valid frame with the arm switch up, sticks centred and throttle at
/// midpoint.
pub fn armed_snapshot() -> ReceiverSnapshot {
    ReceiverSnapshot::new(true, [RX_MID_INPUT; 5]).with_channel(Channel::Aux2, RX_MAX_INPUT)
}

/// Receiver returning a fixed snapshot, optionally invalid for the first
/// few validity polls.
#[derive(Debug)]
pub struct ScriptedReceiver {
    pub snapshot: ReceiverSnapshot,
    invalid_polls: u32,
    polls: Cell<u32>,
}

impl ScriptedReceiver {
    pub fn new(snapshot: ReceiverSnapshot) -> Self {
        Self::valid_after(snapshot, 0)
    }

    /// Reports invalid until `invalid_polls` validity polls have been made.
    pub fn valid_after(snapshot: ReceiverSnapshot, invalid_polls: u32) -> Self {
        Self {
            snapshot,
            invalid_polls,
            polls: Cell::new(0),
        }
    }

    pub fn polls(&self) -> u32 {
        self.polls.get()
    }
}

impl Receiver for ScriptedReceiver {
    fn is_valid(&self) -> bool {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        self.snapshot.valid && polls > self.invalid_polls
    }

    fn channel(&self, channel: Channel) -> u16 {
        self.snapshot.channel(channel)
    }
}

/// Inertial sensor with a latched sample that reading clears.
#[derive(Debug, Default)]
pub struct FakeImu {
    pub ready: bool,
    pub gyro: [i16; 3],
    pub angles: (f32, f32),
    pub gyro_reads: u32,
    pub angle_reads: u32,
    pub last_angle_dt: f32,
}

impl FakeImu {
    /// A sensor with one gyro sample latched.
    pub fn with_gyro(gyro: [i16; 3]) -> Self {
        Self {
            ready: true,
            gyro,
            ..Self::default()
        }
    }
}

impl InertialSensor<f32> for FakeImu {
    fn data_ready(&mut self) -> bool {
        self.ready
    }

    fn read_gyro(&mut self) -> [i16; 3] {
        self.ready = false;
        self.gyro_reads += 1;
        self.gyro
    }

    fn read_angles(&mut self, dt: f32) -> (f32, f32) {
        self.ready = false;
        self.angle_reads += 1;
        self.last_angle_dt = dt;
        self.angles
    }
}

/// Motor output that records every command.
#[derive(Debug, Default)]
pub struct RecordingMotors {
    pub updates: Vec<MotorCommands<f32>>,
    pub all_off_calls: u32,
}

impl MotorOutput<f32> for RecordingMotors {
    fn update(&mut self, motors: &MotorCommands<f32>) {
        self.updates.push(*motors);
    }

    fn all_off(&mut self) {
        self.all_off_calls += 1;
    }
}

/// Clock set by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub now: u32,
}

impl Clock for ManualClock {
    fn now_micros(&mut self) -> u32 {
        self.now
    }
}

#[derive(Debug, Default)]
pub struct CountingSonar {
    pub triggers: u32,
}

impl Sonar for CountingSonar {
    fn trigger(&mut self) {
        self.triggers += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingIndicator {
    pub last: Option<IndicatorState>,
}

impl StatusIndicator for RecordingIndicator {
    fn show(&mut self, state: IndicatorState) {
        self.last = Some(state);
    }
}
