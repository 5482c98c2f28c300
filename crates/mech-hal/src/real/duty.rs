use crate::configure::{CONFIGURE_ATTEMPTS, absorb, try_until_ok};
use crate::inputs::{ClimberInputs, FeederInputs, MotorInputs};
use crate::io::{ActuatorIo, ClimberIo, FeederIo};
use crate::motor::{EncoderConversion, MotorConfig, MotorController};
use crate::presets;
use crate::sample::sample_motor;
use mech_config::{ClimberConstants, FeederConstants};
use mech_units::DutyCycle;

/// 单电机开环机构
struct DutyMotor<M> {
    name: &'static str,
    motor: M,
    conversion: EncoderConversion,
}

impl<M: MotorController> DutyMotor<M> {
    fn new(name: &'static str, mut motor: M, config: &MotorConfig) -> Self {
        try_until_ok(name, CONFIGURE_ATTEMPTS, || motor.configure(config));
        Self {
            name,
            motor,
            conversion: config.conversion(),
        }
    }

    fn sample(&self, previous: &MotorInputs) -> MotorInputs {
        sample_motor(&self.motor, &self.conversion, previous)
    }

    fn set(&mut self, duty: DutyCycle) {
        absorb(self.name, "set_duty_cycle", self.motor.set_duty_cycle(duty.value()));
    }
}

/// 真实送料器
pub struct RealFeederIo<M> {
    inner: DutyMotor<M>,
}

impl<M: MotorController> RealFeederIo<M> {
    /// 配置送料电机并组装后端
    pub fn new(motor: M, constants: &FeederConstants) -> Self {
        Self {
            inner: DutyMotor::new("feeder", motor, &presets::feeder(constants)),
        }
    }

    pub fn motor(&self) -> &M {
        &self.inner.motor
    }
}

impl<M: MotorController> ActuatorIo for RealFeederIo<M> {
    type Inputs = FeederInputs;

    fn update_inputs(&mut self, previous: &FeederInputs) -> FeederInputs {
        FeederInputs {
            motor: self.inner.sample(&previous.motor),
        }
    }
}

impl<M: MotorController> FeederIo for RealFeederIo<M> {
    fn set_duty_cycle(&mut self, duty: DutyCycle) {
        self.inner.set(duty);
    }
}

/// 真实爬升机构
pub struct RealClimberIo<M> {
    inner: DutyMotor<M>,
}

impl<M: MotorController> RealClimberIo<M> {
    /// 配置爬升电机并组装后端
    pub fn new(motor: M, constants: &ClimberConstants) -> Self {
        Self {
            inner: DutyMotor::new("climber", motor, &presets::climber(constants)),
        }
    }

    pub fn motor(&self) -> &M {
        &self.inner.motor
    }
}

impl<M: MotorController> ActuatorIo for RealClimberIo<M> {
    type Inputs = ClimberInputs;

    fn update_inputs(&mut self, previous: &ClimberInputs) -> ClimberInputs {
        ClimberInputs {
            motor: self.inner.sample(&previous.motor),
        }
    }
}

impl<M: MotorController> ClimberIo for RealClimberIo<M> {
    fn set_duty_cycle(&mut self, duty: DutyCycle) {
        self.inner.set(duty);
    }
}
