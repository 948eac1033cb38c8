// src/arming.rs

//! # Arming State Machine
//!
//! Decides every loop iteration whether the motors may be driven. Anything
//! short of a valid receiver frame, the arm switch at or above its midpoint
//! and the throttle lifted off its minimum drives the motors to the explicit
//! off command and zeroes every axis controller.

use crate::peripherals::{IndicatorState, MotorOutput};
use crate::pid::AxisPid;
use crate::receiver::{Channel, ReceiverSnapshot, RxLimits};
use crate::Number;

/// Throttle travel above the minimum required before the motors are driven.
pub const ARM_THROTTLE_MARGIN: u16 = 25;

/// Arming state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArmingState {
    /// Motors held off, controllers held at zero.
    #[default]
    Disarmed,
    /// Control output reaches the motors.
    Armed,
}

impl ArmingState {
    /// `true` when armed.
    pub fn is_armed(self) -> bool {
        self == ArmingState::Armed
    }
}

/// Stateless arming rules over a receiver snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmingPolicy {
    /// Receiver pulse-width bounds.
    pub limits: RxLimits,
    /// Throttle travel above `limits.min` required to arm.
    pub throttle_margin: u16,
}

impl ArmingPolicy {
    /// Creates a policy.
    pub fn new(limits: RxLimits, throttle_margin: u16) -> Self {
        Self {
            limits,
            throttle_margin,
        }
    }

    /// Lowest throttle pulse width that keeps the vehicle armed.
    pub fn arm_throttle_threshold(&self) -> u16 {
        self.limits.min.saturating_add(self.throttle_margin)
    }

    /// Whether the arm switch is in the armed position on a valid frame.
    pub fn switch_armed(&self, snapshot: &ReceiverSnapshot) -> bool {
        snapshot.valid && snapshot.channel(Channel::Aux2) >= self.limits.mid
    }

    /// The state a snapshot maps to.
    pub fn evaluate(&self, snapshot: &ReceiverSnapshot) -> ArmingState {
        if self.switch_armed(snapshot)
            && snapshot.channel(Channel::Throttle) >= self.arm_throttle_threshold()
        {
            ArmingState::Armed
        } else {
            ArmingState::Disarmed
        }
    }

    /// Whether the loop may start: the receiver is valid and the arm switch
    /// is not above its midpoint, so power-up never lands straight in the
    /// armed state.
    pub fn startup_gate_open(&self, snapshot: &ReceiverSnapshot) -> bool {
        snapshot.valid && snapshot.channel(Channel::Aux2) <= self.limits.mid
    }

    /// Operator feedback for a snapshot. Follows the arm switch, not the
    /// throttle check.
    pub fn indicator(&self, snapshot: &ReceiverSnapshot) -> IndicatorState {
        if self.switch_armed(snapshot) {
            IndicatorState::Armed
        } else {
            IndicatorState::Disarmed
        }
    }
}

/// Arming state plus the safety actions tied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmingStateMachine {
    policy: ArmingPolicy,
    state: ArmingState,
}

impl ArmingStateMachine {
    /// Starts disarmed.
    pub fn new(policy: ArmingPolicy) -> Self {
        Self {
            policy,
            state: ArmingState::Disarmed,
        }
    }

    /// The rules in use.
    pub fn policy(&self) -> &ArmingPolicy {
        &self.policy
    }

    /// Current state.
    pub fn state(&self) -> ArmingState {
        self.state
    }

    /// Evaluates a fresh snapshot. While disarmed, every call sends the off
    /// command and resets all controllers, not only on the transition.
    pub fn update<T, M>(
        &mut self,
        snapshot: &ReceiverSnapshot,
        motors: &mut M,
        controllers: &mut [AxisPid<T>],
    ) -> ArmingState
    where
        T: Number,
        M: MotorOutput<T> + ?Sized,
    {
        let next = self.policy.evaluate(snapshot);

        if next == ArmingState::Disarmed {
            motors.all_off();
            for pid in controllers.iter_mut() {
                pid.reset();
            }
        }

        if next != self.state {
            match next {
                ArmingState::Armed => log::info!("armed"),
                ArmingState::Disarmed => log::info!(
                    "disarmed (rx valid: {}, aux2: {}, throttle: {})",
                    snapshot.valid,
                    snapshot.channel(Channel::Aux2),
                    snapshot.channel(Channel::Throttle)
                ),
            }
        }

        self.state = next;
        next
    }
}
