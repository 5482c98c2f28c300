//! 送料器控制器（开环）

use crate::subsystem::Subsystem;
use mech_hal::{FeederInputs, FeederIo};
use mech_telemetry::{InputsRef, TelemetrySink};
use mech_units::DutyCycle;

/// 送料器
pub struct Feeder<B: FeederIo> {
    io: B,
    inputs: FeederInputs,
    speed: DutyCycle,
}

impl<B: FeederIo> Feeder<B> {
    pub fn new(io: B) -> Self {
        Self {
            io,
            inputs: FeederInputs::default(),
            speed: DutyCycle::ZERO,
        }
    }

    /// 开环输出
    pub fn set_speed(&mut self, speed: DutyCycle) {
        self.speed = speed;
        self.io.set_duty_cycle(speed);
    }

    pub fn stop(&mut self) {
        self.set_speed(DutyCycle::ZERO);
    }

    /// 当前输出设定
    pub fn speed(&self) -> DutyCycle {
        self.speed
    }

    pub fn inputs(&self) -> &FeederInputs {
        &self.inputs
    }

    pub fn io(&self) -> &B {
        &self.io
    }
}

impl<B: FeederIo> Subsystem for Feeder<B> {
    fn name(&self) -> &'static str {
        "Feeder"
    }

    fn periodic(&mut self, sink: &mut dyn TelemetrySink) {
        self.inputs = self.io.update_inputs(&self.inputs);
        sink.process_inputs(InputsRef::Feeder(&self.inputs));
        sink.record_number("Feeder/Desired-Speed", self.speed.value());
    }

    fn stop(&mut self) {
        Feeder::stop(self);
    }
}
