// src/receiver.rs

//! # Radio Receiver Input
//!
//! Logical channel names, pulse-width limits and the per-iteration snapshot
//! the control loop reads from the receiver driver.

use crate::error::{Error, ErrorKind, Result};

/// Lowest pulse width the receiver reports, in microseconds.
pub const RX_MIN_INPUT: u16 = 1000;
/// Stick centre and arm switch threshold, in microseconds.
pub const RX_MID_INPUT: u16 = 1500;
/// Highest pulse width the receiver reports, in microseconds.
pub const RX_MAX_INPUT: u16 = 2000;

/// Number of channels the control core reads.
pub const CHANNEL_COUNT: usize = 5;

/// Logical receiver channels consumed by the control core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Collective throttle.
    Throttle = 0,
    /// Roll stick.
    Aileron = 1,
    /// Pitch stick.
    Elevator = 2,
    /// Yaw stick.
    Rudder = 3,
    /// Arm switch.
    Aux2 = 4,
}

impl Channel {
    /// All channels in snapshot order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Throttle,
        Channel::Aileron,
        Channel::Elevator,
        Channel::Rudder,
        Channel::Aux2,
    ];
}

/// Receiver pulse-width bounds and midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxLimits {
    /// Minimum pulse width.
    pub min: u16,
    /// Midpoint pulse width.
    pub mid: u16,
    /// Maximum pulse width.
    pub max: u16,
}

impl RxLimits {
    /// Limits of a standard 1000-2000 µs receiver.
    pub const fn new() -> Self {
        Self {
            min: RX_MIN_INPUT,
            mid: RX_MID_INPUT,
            max: RX_MAX_INPUT,
        }
    }

    /// Custom limits, rejected unless `min < mid < max`.
    pub fn try_new(min: u16, mid: u16, max: u16) -> Result<Self> {
        let limits = Self { min, mid, max };
        if !limits.is_ordered() {
            return Err(Error::new(ErrorKind::InvalidRange, "receiver limits must satisfy min < mid < max"));
        }
        Ok(limits)
    }

    /// Whether `min < mid < max` holds. Sticks cannot be mapped otherwise.
    pub fn is_ordered(&self) -> bool {
        self.min < self.mid && self.mid < self.max
    }
}

impl Default for RxLimits {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver driver as seen by the control core.
///
/// Both calls must be cheap and non-blocking; they are made every loop
/// iteration.
pub trait Receiver {
    /// Whether the latest decoded frame is fresh and trustworthy.
    fn is_valid(&self) -> bool;
    /// Latest pulse width of a channel.
    fn channel(&self, channel: Channel) -> u16;
}

/// Receiver state captured once per loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverSnapshot {
    /// Receiver validity at capture time.
    pub valid: bool,
    channels: [u16; CHANNEL_COUNT],
}

impl ReceiverSnapshot {
    /// Builds a snapshot from explicit values.
    pub fn new(valid: bool, channels: [u16; CHANNEL_COUNT]) -> Self {
        Self { valid, channels }
    }

    /// An invalid snapshot with every channel at the minimum.
    pub fn invalid(limits: &RxLimits) -> Self {
        Self::new(false, [limits.min; CHANNEL_COUNT])
    }

    /// Reads validity and every channel from the receiver.
    pub fn capture<R: Receiver + ?Sized>(receiver: &R) -> Self {
        let mut channels = [0; CHANNEL_COUNT];
        for channel in Channel::ALL {
            channels[channel as usize] = receiver.channel(channel);
        }
        Self::new(receiver.is_valid(), channels)
    }

    /// Pulse width of a channel.
    pub fn channel(&self, channel: Channel) -> u16 {
        self.channels[channel as usize]
    }

    /// Returns a copy with one channel replaced.
    pub fn with_channel(mut self, channel: Channel, value: u16) -> Self {
        self.channels[channel as usize] = value;
        self
    }
}
