use super::SIM_DT;
use super::motor::SimMotor;
use super::physics::RollerSim;
use crate::configure::{CONFIGURE_ATTEMPTS, absorb, try_until_ok};
use crate::inputs::{ClimberInputs, FeederInputs, MotorInputs};
use crate::io::{ActuatorIo, ClimberIo, FeederIo};
use crate::motor::{EncoderConversion, MotorConfig, MotorController};
use crate::presets;
use crate::sample::sample_motor;
use mech_config::{ClimberConstants, FeederConstants};
use mech_units::DutyCycle;
use std::time::Duration;

/// 单电机开环仿真
struct SimDutyMotor {
    name: &'static str,
    motor: SimMotor,
    sim: RollerSim,
    conversion: EncoderConversion,
    dt: Duration,
}

impl SimDutyMotor {
    fn new(name: &'static str, mut motor: SimMotor, config: &MotorConfig) -> Self {
        try_until_ok(name, CONFIGURE_ATTEMPTS, || motor.configure(config));
        Self {
            name,
            motor,
            sim: RollerSim::new().with_current_limit(config.get_secondary_current_limit().value()),
            conversion: config.conversion(),
            dt: SIM_DT,
        }
    }

    fn step(&mut self, previous: &MotorInputs) -> MotorInputs {
        let dt = self.dt.as_secs_f64();
        let duty = self.motor.closed_loop_output(dt);
        self.motor.set_sensors(self.sim.step(duty, dt));
        sample_motor(&self.motor, &self.conversion, previous)
    }

    fn set(&mut self, duty: DutyCycle) {
        absorb(self.name, "set_duty_cycle", self.motor.set_duty_cycle(duty.value()));
    }
}

/// 仿真送料器
pub struct SimFeederIo {
    inner: SimDutyMotor,
}

impl SimFeederIo {
    pub fn new(constants: &FeederConstants) -> Self {
        Self::with_motor(SimMotor::new(), constants)
    }

    pub fn with_motor(motor: SimMotor, constants: &FeederConstants) -> Self {
        Self {
            inner: SimDutyMotor::new("feeder", motor, &presets::feeder(constants)),
        }
    }

    /// 修改仿真步长
    pub fn with_dt(mut self, dt: Duration) -> Self {
        self.inner.dt = dt;
        self
    }

    pub fn motor(&self) -> &SimMotor {
        &self.inner.motor
    }
}

impl ActuatorIo for SimFeederIo {
    type Inputs = FeederInputs;

    fn update_inputs(&mut self, previous: &FeederInputs) -> FeederInputs {
        FeederInputs {
            motor: self.inner.step(&previous.motor),
        }
    }
}

impl FeederIo for SimFeederIo {
    fn set_duty_cycle(&mut self, duty: DutyCycle) {
        self.inner.set(duty);
    }
}

/// 仿真爬升机构
pub struct SimClimberIo {
    inner: SimDutyMotor,
}

impl SimClimberIo {
    pub fn new(constants: &ClimberConstants) -> Self {
        Self::with_motor(SimMotor::new(), constants)
    }

    pub fn with_motor(motor: SimMotor, constants: &ClimberConstants) -> Self {
        Self {
            inner: SimDutyMotor::new("climber", motor, &presets::climber(constants)),
        }
    }

    /// 修改仿真步长
    pub fn with_dt(mut self, dt: Duration) -> Self {
        self.inner.dt = dt;
        self
    }

    pub fn motor(&self) -> &SimMotor {
        &self.inner.motor
    }
}

impl ActuatorIo for SimClimberIo {
    type Inputs = ClimberInputs;

    fn update_inputs(&mut self, previous: &ClimberInputs) -> ClimberInputs {
        ClimberInputs {
            motor: self.inner.step(&previous.motor),
        }
    }
}

impl ClimberIo for SimClimberIo {
    fn set_duty_cycle(&mut self, duty: DutyCycle) {
        self.inner.set(duty);
    }
}
