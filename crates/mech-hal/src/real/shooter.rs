use crate::configure::{CONFIGURE_ATTEMPTS, absorb, try_until_ok};
use crate::inputs::ShooterInputs;
use crate::io::{ActuatorIo, ShooterIo};
use crate::motor::{ControlType, EncoderConversion, MotorController};
use crate::presets;
use crate::sample::sample_motor;
use mech_config::ShooterConfig;
use mech_units::{DutyCycle, RadPerSec};

/// 真实射手：单飞轮电机，板载速度闭环
pub struct RealShooterIo<M> {
    flywheel: M,
    conversion: EncoderConversion,
}

impl<M: MotorController> RealShooterIo<M> {
    /// 配置飞轮电机并组装后端
    pub fn new(mut flywheel: M, config: &ShooterConfig) -> Self {
        let motor_config = presets::flywheel(config);
        try_until_ok("flywheel", CONFIGURE_ATTEMPTS, || flywheel.configure(&motor_config));
        Self {
            flywheel,
            conversion: motor_config.conversion(),
        }
    }

    /// 飞轮电机
    pub fn flywheel(&self) -> &M {
        &self.flywheel
    }
}

impl<M: MotorController> ActuatorIo for RealShooterIo<M> {
    type Inputs = ShooterInputs;

    fn update_inputs(&mut self, previous: &ShooterInputs) -> ShooterInputs {
        ShooterInputs {
            flywheel: sample_motor(&self.flywheel, &self.conversion, &previous.flywheel),
        }
    }
}

impl<M: MotorController> ShooterIo for RealShooterIo<M> {
    fn set_flywheel_velocity(&mut self, velocity: RadPerSec) {
        let rpm = self.conversion.raw_velocity(velocity);
        absorb(
            "flywheel",
            "set_reference",
            self.flywheel.set_reference(rpm, ControlType::Velocity),
        );
    }

    fn set_flywheel_duty_cycle(&mut self, duty: DutyCycle) {
        absorb("flywheel", "set_duty_cycle", self.flywheel.set_duty_cycle(duty.value()));
    }

    fn stop_flywheel(&mut self) {
        // 积分清零必须在停机之前
        absorb(
            "flywheel",
            "set_integral_accumulator",
            self.flywheel.set_integral_accumulator(0.0),
        );
        self.flywheel.stop_motor();
    }
}
