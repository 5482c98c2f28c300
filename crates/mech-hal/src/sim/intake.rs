use super::SIM_DT;
use super::motor::{MotorCommand, SimDigitalInput, SimMotor, SimSensors};
use super::physics::{ArmDrive, ArmSim, RollerSim};
use crate::configure::{CONFIGURE_ATTEMPTS, absorb, try_until_ok};
use crate::follower::{FollowerSign, LeaderFollower};
use crate::geometry::PivotGeometry;
use crate::inputs::IntakeInputs;
use crate::io::{ActuatorIo, IntakeIo};
use crate::motor::{ControlType, DigitalInput, EncoderConversion, MotorController};
use crate::presets;
use crate::sample::{retain, sample_motor};
use mech_config::IntakeConfig;
use mech_units::{DutyCycle, Rad};
use std::time::Duration;

/// 仿真进气臂
///
/// 俯仰臂从软限位下限（收起位置）静止开始。
pub struct SimIntakeIo {
    pivot: LeaderFollower<SimMotor>,
    roller: SimMotor,
    upper_limit_switch: SimDigitalInput,
    arm: ArmSim,
    roller_sim: RollerSim,
    geometry: PivotGeometry,
    pivot_conversion: EncoderConversion,
    roller_conversion: EncoderConversion,
    dt: Duration,
}

impl SimIntakeIo {
    /// 使用新的仿真电机
    pub fn new(config: &IntakeConfig) -> Self {
        Self::with_motors(SimMotor::new(), SimMotor::new(), SimMotor::new(), config)
    }

    /// 使用给定的仿真电机（测试可预先注入故障）
    pub fn with_motors(
        leader: SimMotor,
        follower: SimMotor,
        mut roller: SimMotor,
        config: &IntakeConfig,
    ) -> Self {
        let pivot_config = presets::intake_pivot(config);
        let roller_config = presets::intake_roller(config);
        let sign = FollowerSign::from_opposed(config.constants.follower_opposed);
        let mut pivot = LeaderFollower::new(leader, follower, sign);

        try_until_ok("intake_pivot_leader", CONFIGURE_ATTEMPTS, || {
            pivot.configure_leader(&pivot_config)
        });
        try_until_ok("intake_pivot_follower", CONFIGURE_ATTEMPTS, || {
            pivot.configure_follower(&pivot_config)
        });
        try_until_ok("intake_roller", CONFIGURE_ATTEMPTS, || {
            roller.configure(&roller_config)
        });

        let geometry = PivotGeometry::from(&config.constants);
        let pivot_limit = pivot_config.get_secondary_current_limit().value();
        let roller_limit = roller_config.get_secondary_current_limit().value();

        let io = Self {
            pivot,
            roller,
            upper_limit_switch: SimDigitalInput::new(),
            arm: ArmSim::new(geometry.min, geometry.max, geometry.min)
                .with_current_limit(pivot_limit * 2.0),
            roller_sim: RollerSim::new().with_current_limit(roller_limit),
            geometry,
            pivot_conversion: pivot_config.conversion(),
            roller_conversion: roller_config.conversion(),
            dt: SIM_DT,
        };
        io.write_pivot_sensors(SimSensors::default(), geometry.min);
        io.upper_limit_switch.set(io.arm.upper_limit_triggered());
        io
    }

    /// 修改仿真步长
    pub fn with_dt(mut self, dt: Duration) -> Self {
        self.dt = dt;
        self
    }

    /// 俯仰主从电机组
    pub fn pivot(&self) -> &LeaderFollower<SimMotor> {
        &self.pivot
    }

    /// 滚轮电机
    pub fn roller_motor(&self) -> &SimMotor {
        &self.roller
    }

    /// 上限位开关
    pub fn upper_limit_switch(&self) -> &SimDigitalInput {
        &self.upper_limit_switch
    }

    /// 俯仰臂模型
    pub fn arm(&self) -> &ArmSim {
        &self.arm
    }

    fn arm_drive(&self) -> ArmDrive {
        match self.pivot.leader().command() {
            MotorCommand::Position(rotations) => {
                let encoder = self.pivot_conversion.position(rotations);
                ArmDrive::Target(self.geometry.to_mechanism(encoder))
            },
            MotorCommand::DutyCycle(duty) => ArmDrive::Duty(duty),
            MotorCommand::Stopped | MotorCommand::Velocity(_) => ArmDrive::Duty(0.0),
        }
    }

    /// 主电机写入编码器坐标读数，从电机按符号镜像
    fn write_pivot_sensors(&self, base: SimSensors, mechanism: Rad) {
        let leader = SimSensors {
            position: self.pivot_conversion.raw_position(self.geometry.to_encoder(mechanism)),
            ..base
        };
        let sign = self.pivot.sign();
        self.pivot.leader().set_sensors(leader);
        self.pivot.follower().set_sensors(SimSensors {
            applied_output: sign.apply(leader.applied_output),
            position: sign.apply(leader.position),
            velocity: sign.apply(leader.velocity),
            ..leader
        });
    }
}

impl ActuatorIo for SimIntakeIo {
    type Inputs = IntakeInputs;

    fn update_inputs(&mut self, previous: &IntakeInputs) -> IntakeInputs {
        let dt = self.dt.as_secs_f64();

        let drive = self.arm_drive();
        let state = self.arm.step(drive, dt);
        self.write_pivot_sensors(
            SimSensors {
                temperature: state.temperature,
                bus_voltage: state.bus_voltage,
                applied_output: state.applied_output,
                // 两台电机平分负载
                output_current: state.current / 2.0,
                position: 0.0,
                velocity: self.pivot_conversion.raw_velocity(state.velocity),
            },
            state.angle,
        );

        let roller_duty = self.roller.closed_loop_output(dt);
        self.roller.set_sensors(self.roller_sim.step(roller_duty, dt));
        self.upper_limit_switch.set(self.arm.upper_limit_triggered());

        IntakeInputs {
            pivot_leader: sample_motor(
                self.pivot.leader(),
                &self.pivot_conversion,
                &previous.pivot_leader,
            ),
            pivot_follower: sample_motor(
                self.pivot.follower(),
                &self.pivot_conversion,
                &previous.pivot_follower,
            ),
            roller: sample_motor(&self.roller, &self.roller_conversion, &previous.roller),
            upper_limit_switch: self
                .upper_limit_switch
                .get()
                .unwrap_or_else(|e| retain("upper_limit_switch", e, previous.upper_limit_switch)),
        }
    }
}

impl IntakeIo for SimIntakeIo {
    fn set_pivot_target(&mut self, encoder_angle: Rad) {
        let clamped = self.geometry.clamp_encoder(encoder_angle);
        let rotations = self.pivot_conversion.raw_position(clamped);
        absorb(
            "intake_pivot",
            "set_reference",
            self.pivot.set_reference(rotations, ControlType::Position),
        );
    }

    fn set_pivot_duty_cycle(&mut self, duty: DutyCycle) {
        absorb("intake_pivot", "set_duty_cycle", self.pivot.set_duty_cycle(duty.value()));
    }

    fn set_roller_duty_cycle(&mut self, duty: DutyCycle) {
        absorb("intake_roller", "set_duty_cycle", self.roller.set_duty_cycle(duty.value()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mech_config::{IntakeConstants, TunableStore};
    use mech_units::Deg;

    fn io() -> SimIntakeIo {
        let store = TunableStore::new();
        SimIntakeIo::new(&IntakeConfig::new(IntakeConstants::default(), &store))
    }

    #[test]
    fn test_starts_stowed() {
        let mut io = io();
        let inputs = io.update_inputs(&IntakeInputs::default());
        assert!(inputs.upper_limit_switch);
        assert!(inputs.pivot_leader.position.abs() < Deg(0.5).to_rad());
    }

    #[test]
    fn test_follower_mirrors_leader() {
        let mut io = io();
        io.set_pivot_target(Deg(45.0).to_rad());
        let mut inputs = IntakeInputs::default();
        for _ in 0..10 {
            inputs = io.update_inputs(&inputs);
        }
        assert!(inputs.pivot_leader.position > Rad::ZERO);
        assert_eq!(inputs.pivot_follower.position, -inputs.pivot_leader.position);
        assert_eq!(
            io.pivot().follower().command(),
            MotorCommand::Position(-io.pivot_conversion.raw_position(Deg(45.0).to_rad()))
        );
    }

    #[test]
    fn test_target_clamped_to_soft_limit() {
        let mut io = io();
        io.set_pivot_target(Deg(170.0).to_rad());
        let MotorCommand::Position(rotations) = io.pivot().leader().command() else {
            panic!("expected position command");
        };
        let angle = io.pivot_conversion.position(rotations);
        assert!((angle.to_deg().0 - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_roller_spins() {
        let mut io = io();
        io.set_roller_duty_cycle(DutyCycle::new(0.8));
        let mut inputs = IntakeInputs::default();
        for _ in 0..20 {
            inputs = io.update_inputs(&inputs);
        }
        assert!(inputs.roller.velocity.0 > 0.0);
        assert!(inputs.roller.voltage.0 > 0.0);
    }
}
