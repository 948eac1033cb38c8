// demos/acro_sim.rs

use std::cell::Cell;

use quad_acro_flight_core::config::FlightControlConfig;
use quad_acro_flight_core::mixer::MotorCommands;
use quad_acro_flight_core::peripherals::{Clock, InertialSensor, MotorOutput, Peripherals};
use quad_acro_flight_core::receiver::{Channel, Receiver, RX_MAX_INPUT, RX_MID_INPUT, RX_MIN_INPUT};
use quad_acro_flight_core::Scheduler;

// Simulated radio: arm switch flipped up after a few frames, some
// throttle, a little right roll.
struct SimReceiver {
    frames: Cell<u32>,
}

impl Receiver for SimReceiver {
    fn is_valid(&self) -> bool {
        self.frames.set(self.frames.get() + 1);
        true
    }

    fn channel(&self, channel: Channel) -> u16 {
        match channel {
            Channel::Throttle => RX_MIN_INPUT + 400,
            Channel::Aileron => RX_MID_INPUT + 50,
            Channel::Aux2 if self.frames.get() > 5 => RX_MAX_INPUT,
            _ => RX_MID_INPUT,
        }
    }
}

// Gyro that responds to the last roll correction.
struct SimImu {
    roll_rate: f32,
}

impl InertialSensor<f32> for SimImu {
    fn data_ready(&mut self) -> bool {
        true
    }

    fn read_gyro(&mut self) -> [i16; 3] {
        [0, self.roll_rate as i16, 0]
    }

    fn read_angles(&mut self, _dt: f32) -> (f32, f32) {
        (0.0, 0.0)
    }
}

struct PrintMotors {
    last: MotorCommands<f32>,
}

impl MotorOutput<f32> for PrintMotors {
    fn update(&mut self, motors: &MotorCommands<f32>) {
        self.last = *motors;
    }

    fn all_off(&mut self) {
        println!("motors off");
    }
}

// Advances 500 us per call, two calls per loop iteration.
struct SimClock {
    now: u32,
}

impl Clock for SimClock {
    fn now_micros(&mut self) -> u32 {
        self.now = self.now.wrapping_add(500);
        self.now
    }
}

fn main() {
    let io = Peripherals::new(
        SimReceiver { frames: Cell::new(0) },
        SimImu { roll_rate: 0.0 },
        PrintMotors { last: [-100.0; 4] },
        SimClock { now: 0 },
    );
    let mut scheduler = Scheduler::new(FlightControlConfig::acro(), io);
    scheduler.wait_for_disarmed_start();

    println!("      m0,       m1,       m2,       m3");
    for _ in 0..40 {
        let iteration = scheduler.iterate();
        if let Some(motors) = iteration.motors {
            println!(
                "{:-8.3}, {:-8.3}, {:-8.3}, {:-8.3}",
                motors[0], motors[1], motors[2], motors[3]
            );

            // Roll correction spins the frame up toward the commanded rate.
            let roll = (motors[2] - motors[0]) / 2.0;
            let io = scheduler.peripherals_mut();
            io.imu.roll_rate += roll * 10.0;
        }
    }

    println!("last dispatched: {:?}", scheduler.peripherals().motors.last);
}
