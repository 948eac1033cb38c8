// src/scheduler.rs

//! # Control Scheduler
//!
//! The top-level cooperative loop. Each iteration polls the receiver,
//! evaluates arming, refreshes the measurement when the inertial sensor has
//! a sample latched, runs the PID step and mixer when the control period
//! has elapsed, and finally triggers the sonar.
//!
//! All mutable loop state lives in one [`ControlLoopState`] owned by the
//! [`Scheduler`]. Nothing is shared with other contexts; if sensor reads move
//! to an interrupt, hand the sample over through a single-slot buffer that
//! the [`InertialSensor`] implementation reads once per iteration.

use crate::arming::{ArmingPolicy, ArmingState, ArmingStateMachine};
use crate::config::FlightControlConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::map::try_map;
use crate::mixer::{mix_quad_x, MotorCommands, MOTOR_COUNT};
use crate::mode::ControlMode;
use crate::peripherals::{Clock, InertialSensor, MotorOutput, Peripherals, Sonar, StatusIndicator};
use crate::pid::{Axis, AxisPid};
use crate::receiver::{Channel, Receiver, ReceiverSnapshot};
use crate::Number;
use num_traits::FromPrimitive;

const MICROS_PER_MILLI: u32 = 1000;
const MILLIS_PER_SECOND: u16 = 1000;

/// Mutable state of the control loop.
pub struct ControlLoopState<T: Number> {
    arming: ArmingStateMachine,
    controllers: [AxisPid<T>; 3],
    imu_timer: u32,
    pid_timer: u32,
    mode: ControlMode<T>,
    motors: MotorCommands<T>,
}

impl<T: Number + FromPrimitive> ControlLoopState<T> {
    /// Builds disarmed state with zeroed controllers and timers.
    ///
    /// Pitch and yaw controllers are independent instances whose gains are
    /// derived from the roll gains once, here.
    pub fn new(config: &FlightControlConfig<T>) -> Self {
        let roll = AxisPid::with_limits(config.roll_gains, config.integral_limit, config.output_limit);
        let (kp, ki, kd) = config.pitch_gain_scale;
        let pitch = AxisPid::with_scaled_gains(&roll, kp, ki, kd);
        let (kp, ki, kd) = config.yaw_gain_scale;
        let yaw = AxisPid::with_scaled_gains(&roll, kp, ki, kd);

        ControlLoopState {
            arming: ArmingStateMachine::new(ArmingPolicy::new(
                config.rx_limits,
                config.arm_throttle_margin,
            )),
            controllers: [roll, pitch, yaw],
            imu_timer: 0,
            pid_timer: 0,
            mode: ControlMode::new(config.mode),
            motors: [T::zero() - config.stick_range; MOTOR_COUNT],
        }
    }
}

impl<T: Number> ControlLoopState<T> {
    /// Current arming state.
    pub fn arming_state(&self) -> ArmingState {
        self.arming.state()
    }

    /// `true` when armed.
    pub fn armed(&self) -> bool {
        self.arming.state().is_armed()
    }

    /// The controller of one axis.
    pub fn controller(&self, axis: Axis) -> &AxisPid<T> {
        &self.controllers[axis as usize]
    }

    /// Time of the last inertial sample, in microseconds.
    pub fn imu_timer(&self) -> u32 {
        self.imu_timer
    }

    /// Time of the last control tick, in microseconds.
    pub fn pid_timer(&self) -> u32 {
        self.pid_timer
    }

    /// Controller mode and its latest measurement.
    pub fn mode(&self) -> &ControlMode<T> {
        &self.mode
    }

    /// Last motor vector dispatched, or the idle vector before the first tick.
    pub fn motors(&self) -> &MotorCommands<T> {
        &self.motors
    }
}

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iteration<T> {
    /// Arming state after evaluation.
    pub armed: bool,
    /// Whether a fresh inertial sample was read.
    pub imu_sampled: bool,
    /// Motor vector dispatched this iteration, if a control tick ran.
    pub motors: Option<MotorCommands<T>>,
}

/// The flight control loop bound to its drivers.
pub struct Scheduler<T: Number, R, I, M, C, S = (), L = ()> {
    config: FlightControlConfig<T>,
    state: ControlLoopState<T>,
    io: Peripherals<R, I, M, C, S, L>,
}

impl<T, R, I, M, C, S, L> Scheduler<T, R, I, M, C, S, L>
where
    T: Number + FromPrimitive,
    R: Receiver,
    I: InertialSensor<T>,
    M: MotorOutput<T>,
    C: Clock,
    S: Sonar,
    L: StatusIndicator,
{
    /// Creates a disarmed loop.
    ///
    /// An invalid configuration is logged. Ticks whose sticks cannot be
    /// mapped are then skipped, so the motors are never driven from it.
    pub fn new(config: FlightControlConfig<T>, io: Peripherals<R, I, M, C, S, L>) -> Self {
        if let Err(err) = config.validate() {
            log::error!("{}, control ticks will be skipped", err);
        }
        let state = ControlLoopState::new(&config);
        Scheduler { config, state, io }
    }

    /// Creates a disarmed loop, rejecting a configuration that fails
    /// [`FlightControlConfig::validate`].
    pub fn try_new(config: FlightControlConfig<T>, io: Peripherals<R, I, M, C, S, L>) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config, io))
    }

    /// The configuration in use.
    pub fn config(&self) -> &FlightControlConfig<T> {
        &self.config
    }

    /// Loop state.
    pub fn state(&self) -> &ControlLoopState<T> {
        &self.state
    }

    /// The drivers.
    pub fn peripherals(&self) -> &Peripherals<R, I, M, C, S, L> {
        &self.io
    }

    /// Mutable access to the drivers.
    pub fn peripherals_mut(&mut self) -> &mut Peripherals<R, I, M, C, S, L> {
        &mut self.io
    }

    /// Whether the receiver is valid with the arm switch not above midpoint.
    pub fn startup_gate_open(&self) -> bool {
        let snapshot = ReceiverSnapshot::capture(&self.io.receiver);
        self.state.arming.policy().startup_gate_open(&snapshot)
    }

    /// Spins until [`Scheduler::startup_gate_open`] holds.
    pub fn wait_for_disarmed_start(&mut self) {
        while !self.startup_gate_open() {
            core::hint::spin_loop();
        }
        log::info!("receiver valid and arm switch safe, starting control loop");
    }

    /// Waits for the startup gate, then iterates forever.
    pub fn run(&mut self) -> ! {
        self.wait_for_disarmed_start();
        loop {
            let _ = self.iterate();
        }
    }

    /// Runs one loop iteration.
    pub fn iterate(&mut self) -> Iteration<T> {
        let snapshot = ReceiverSnapshot::capture(&self.io.receiver);

        let armed = self
            .state
            .arming
            .update(&snapshot, &mut self.io.motors, &mut self.state.controllers)
            .is_armed();
        self.io
            .indicator
            .show(self.state.arming.policy().indicator(&snapshot));

        let now = self.io.clock.now_micros();
        let imu_sampled = self.io.imu.data_ready();
        if imu_sampled {
            self.sample_imu(now);
        }

        let now = self.io.clock.now_micros();
        let motors = if armed {
            self.control_tick(&snapshot, now)
        } else {
            None
        };

        self.io.sonar.trigger();

        Iteration {
            armed,
            imu_sampled,
            motors,
        }
    }

    fn sample_imu(&mut self, now: u32) {
        let elapsed = now.wrapping_sub(self.state.imu_timer);
        self.state.imu_timer = now;

        let dt = micros_to_seconds(elapsed).unwrap_or_else(|| {
            log::warn!("{}", Error::new(ErrorKind::InvalidTiming, "imu dt not representable"));
            T::zero()
        });
        self.state.mode.refresh(&mut self.io.imu, dt);
    }

    /// Runs the PID step and mixer once more than the control period has
    /// elapsed since the last tick.
    ///
    /// The tick timer only advances here, so the first tick after a disarmed
    /// spell sees a `dt` spanning all of it and the integral moves by
    /// `error * dt` in one step. Configure `integral_limit` to bound it.
    fn control_tick(&mut self, snapshot: &ReceiverSnapshot, now: u32) -> Option<MotorCommands<T>> {
        let elapsed = now.wrapping_sub(self.state.pid_timer);
        if elapsed <= self.config.control_period_us {
            return None;
        }
        self.state.pid_timer = now;

        let Some(dt) = micros_to_seconds::<T>(elapsed) else {
            log::warn!("{}, skipping tick", Error::new(ErrorKind::InvalidTiming, "pid dt not representable"));
            return None;
        };

        let Some(motors) = self.compute_motors(snapshot, dt) else {
            log::warn!("{}, skipping tick", Error::new(ErrorKind::InvalidRange, "stick input not mappable"));
            return None;
        };

        self.io.motors.update(&motors);
        self.state.motors = motors;
        log::debug!("control tick after {} us", elapsed);

        Some(motors)
    }

    fn compute_motors(&mut self, snapshot: &ReceiverSnapshot, dt: T) -> Option<MotorCommands<T>> {
        let aileron = self.stick(snapshot, Channel::Aileron)?;
        let elevator = self.stick(snapshot, Channel::Elevator)?;
        let rudder = self.stick(snapshot, Channel::Rudder)?;
        let throttle = self.stick(snapshot, Channel::Throttle)?;

        let targets = self.state.mode.targets(
            aileron * self.config.stick_scale_roll_pitch,
            elevator * self.config.stick_scale_roll_pitch,
            rudder * self.config.stick_scale_yaw,
        )?;

        let [roll, pitch, yaw] = &mut self.state.controllers;
        let roll_out = roll.update(targets.roll.set_point, targets.roll.measurement, dt);
        let pitch_out = pitch.update(targets.pitch.set_point, targets.pitch.measurement, dt);
        let yaw_out = yaw.update(targets.yaw.set_point, targets.yaw.measurement, dt);

        Some(mix_quad_x(throttle, roll_out, pitch_out, yaw_out))
    }

    /// Maps a channel onto `[-stick_range, stick_range]`.
    ///
    /// `None` when the pulse width does not fit `T` or the receiver limits
    /// span nothing.
    fn stick(&self, snapshot: &ReceiverSnapshot, channel: Channel) -> Option<T> {
        let limits = &self.config.rx_limits;
        let range = self.config.stick_range;
        try_map(
            T::from_u16(snapshot.channel(channel))?,
            T::from_u16(limits.min)?,
            T::from_u16(limits.max)?,
            T::zero() - range,
            range,
        )
        .ok()
    }
}

/// Converts through milliseconds so narrow fixed-point types never hold a
/// full microsecond count.
fn micros_to_seconds<T: Number + FromPrimitive>(micros: u32) -> Option<T> {
    let per_milli = T::from_u32(MICROS_PER_MILLI)?;
    let millis = T::from_u32(micros / MICROS_PER_MILLI)? + T::from_u32(micros % MICROS_PER_MILLI)? / per_milli;
    Some(millis / T::from_u16(MILLIS_PER_SECOND)?)
}
