//! 爬升机构控制器（开环）

use crate::subsystem::Subsystem;
use mech_hal::{ClimberInputs, ClimberIo};
use mech_telemetry::{InputsRef, TelemetrySink};
use mech_units::DutyCycle;

/// 爬升机构
pub struct Climber<B: ClimberIo> {
    io: B,
    inputs: ClimberInputs,
    speed: DutyCycle,
}

impl<B: ClimberIo> Climber<B> {
    pub fn new(io: B) -> Self {
        Self {
            io,
            inputs: ClimberInputs::default(),
            speed: DutyCycle::ZERO,
        }
    }

    pub fn set_speed(&mut self, speed: DutyCycle) {
        self.speed = speed;
        self.io.set_duty_cycle(speed);
    }

    pub fn stop(&mut self) {
        self.set_speed(DutyCycle::ZERO);
    }

    pub fn speed(&self) -> DutyCycle {
        self.speed
    }

    pub fn inputs(&self) -> &ClimberInputs {
        &self.inputs
    }

    pub fn io(&self) -> &B {
        &self.io
    }
}

impl<B: ClimberIo> Subsystem for Climber<B> {
    fn name(&self) -> &'static str {
        "Climber"
    }

    fn periodic(&mut self, sink: &mut dyn TelemetrySink) {
        self.inputs = self.io.update_inputs(&self.inputs);
        sink.process_inputs(InputsRef::Climber(&self.inputs));
        sink.record_number("Climber/Desired-Speed", self.speed.value());
    }

    fn stop(&mut self) {
        Climber::stop(self);
    }
}
