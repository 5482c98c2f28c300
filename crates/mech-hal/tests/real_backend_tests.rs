//! Real 后端集成测试（Mock 电机控制器）

mod common;

use common::mock_motor::{MockCall, MockMotor, MockSwitch};
use mech_config::{
    ClimberConstants, FeederConstants, IntakeConfig, IntakeConstants, ShooterConfig,
    ShooterConstants, TunableStore,
};
use mech_hal::real::{RealClimberIo, RealFeederIo, RealIntakeIo, RealShooterIo};
use mech_hal::{
    ActuatorIo, ClimberIo, ControlType, DynIntakeIo, FeederIo, IntakeInputs, IntakeIo, MotorError,
    PivotGeometry, ShooterInputs, ShooterIo, Signal,
};
use mech_units::{Amps, Celsius, Deg, DutyCycle, RadPerSec, Volts};
use proptest::prelude::*;
use std::f64::consts::TAU;

struct IntakeRig {
    leader: MockMotor,
    follower: MockMotor,
    roller: MockMotor,
    switch: MockSwitch,
    io: RealIntakeIo<MockMotor, MockSwitch>,
}

fn intake_rig(constants: IntakeConstants) -> IntakeRig {
    let store = TunableStore::new();
    let config = IntakeConfig::new(constants, &store);
    let (leader, follower, roller) = (MockMotor::new(), MockMotor::new(), MockMotor::new());
    let switch = MockSwitch::new(false);
    let io = RealIntakeIo::new(
        leader.clone(),
        follower.clone(),
        roller.clone(),
        switch.clone(),
        &config,
    );
    IntakeRig {
        leader,
        follower,
        roller,
        switch,
        io,
    }
}

fn shooter_rig() -> (MockMotor, RealShooterIo<MockMotor>) {
    let store = TunableStore::new();
    let config = ShooterConfig::new(ShooterConstants::default(), &store);
    let motor = MockMotor::new();
    let io = RealShooterIo::new(motor.clone(), &config);
    (motor, io)
}

#[test]
fn test_intake_configures_every_motor() {
    let rig = intake_rig(IntakeConstants::default());

    assert_eq!(rig.leader.configure_count(), 1);
    assert_eq!(rig.follower.configure_count(), 1);
    assert_eq!(rig.roller.configure_count(), 1);

    let leader = rig.leader.config().unwrap();
    let follower = rig.follower.config().unwrap();
    // 方向关系只由 FollowerSign 提供
    assert_eq!(leader.is_inverted(), follower.is_inverted());
    assert!(leader.gains().is_some());
    assert!(rig.roller.config().unwrap().gains().is_none());
}

#[test]
fn test_configure_retry_bound() {
    let store = TunableStore::new();
    let config = ShooterConfig::new(ShooterConstants::default(), &store);
    let motor = MockMotor::new();
    motor.fail_configures(100);

    let mut io = RealShooterIo::new(motor.clone(), &config);
    assert_eq!(motor.configure_count(), 5);
    assert!(motor.config().is_none());

    // 部分配置的后端仍可使用
    io.set_flywheel_velocity(RadPerSec(10.0));
    assert_eq!(motor.commands().len(), 1);
}

#[test]
fn test_configure_recovers_within_bound() {
    let motor = MockMotor::new();
    motor.fail_configures(4);
    let _io = RealFeederIo::new(motor.clone(), &FeederConstants::default());

    assert_eq!(motor.configure_count(), 5);
    assert!(motor.config().is_some());
}

#[test]
fn test_pivot_target_offset_and_clamp() {
    let mut rig = intake_rig(IntakeConstants {
        zero_offset_deg: 10.0,
        ..Default::default()
    });
    let geometry = rig.io.geometry();

    rig.io.set_pivot_target(geometry.to_encoder(Deg(50.0).to_rad()));
    let MockCall::Reference(rotations, ControlType::Position) = rig.leader.commands()[0] else {
        panic!("expected position reference");
    };
    // 50° + 10° 偏移 = 60° = 1/6 圈（直驱）
    assert!((rotations - 60.0 / 360.0).abs() < 1e-12);

    rig.leader.clear_calls();
    rig.io.set_pivot_target(geometry.to_encoder(Deg(135.0).to_rad()));
    let MockCall::Reference(rotations, _) = rig.leader.commands()[0] else {
        panic!("expected position reference");
    };
    // 限位 90° + 10° 偏移
    assert!((rotations - 100.0 / 360.0).abs() < 1e-12);
}

#[test]
fn test_follower_receives_opposed_commands() {
    let mut rig = intake_rig(IntakeConstants::default());

    rig.io.set_pivot_duty_cycle(DutyCycle::new(0.3));
    rig.io.set_pivot_target(Deg(20.0).to_rad());

    let leader = rig.leader.commands();
    let follower = rig.follower.commands();
    assert_eq!(leader[0], MockCall::DutyCycle(0.3));
    assert_eq!(follower[0], MockCall::DutyCycle(-0.3));
    match (&leader[1], &follower[1]) {
        (MockCall::Reference(l, ControlType::Position), MockCall::Reference(f, ControlType::Position)) => {
            assert_eq!(*f, -*l);
        },
        other => panic!("unexpected calls {other:?}"),
    }
}

#[test]
fn test_follower_aligned() {
    let mut rig = intake_rig(IntakeConstants {
        follower_opposed: false,
        ..Default::default()
    });
    rig.io.set_pivot_duty_cycle(DutyCycle::new(-0.5));
    assert_eq!(rig.follower.commands(), vec![MockCall::DutyCycle(-0.5)]);
}

#[test]
fn test_roller_is_not_mirrored() {
    let mut rig = intake_rig(IntakeConstants::default());
    rig.io.set_roller_duty_cycle(DutyCycle::new(0.8));

    assert_eq!(rig.roller.commands(), vec![MockCall::DutyCycle(0.8)]);
    assert!(rig.leader.commands().is_empty());
    assert!(rig.follower.commands().is_empty());
}

#[test]
fn test_sample_converts_units() {
    let (motor, mut io) = shooter_rig();
    motor.set_reading(Signal::Temperature, 41.0);
    motor.set_reading(Signal::BusVoltage, 12.5);
    motor.set_reading(Signal::AppliedOutput, 0.5);
    motor.set_reading(Signal::OutputCurrent, 30.0);
    motor.set_reading(Signal::Velocity, 3000.0);

    let inputs = io.update_inputs(&ShooterInputs::default());
    let flywheel = inputs.flywheel;
    assert_eq!(flywheel.temperature, Celsius(41.0));
    assert_eq!(flywheel.voltage, Volts(6.25));
    assert_eq!(flywheel.current, Amps(30.0));
    // 2:1 减速：电机 3000 RPM = 飞轮 1500 RPM
    assert!((flywheel.velocity.to_rpm().0 - 1500.0).abs() < 1e-9);
}

#[test]
fn test_failed_read_retains_only_that_field() {
    let (motor, mut io) = shooter_rig();
    motor.set_reading(Signal::Velocity, 1000.0);
    motor.set_reading(Signal::OutputCurrent, 10.0);
    let first = io.update_inputs(&ShooterInputs::default());

    motor.set_reading(Signal::Velocity, 2000.0);
    motor.set_reading(Signal::OutputCurrent, 20.0);
    motor.fail_reading(Signal::Velocity);
    let second = io.update_inputs(&first);

    assert_eq!(second.flywheel.velocity, first.flywheel.velocity);
    assert_eq!(second.flywheel.current, Amps(20.0));

    motor.restore(Signal::Velocity);
    let third = io.update_inputs(&second);
    assert!(third.flywheel.velocity > second.flywheel.velocity);
}

#[test]
fn test_voltage_retained_when_bus_read_fails() {
    let (motor, mut io) = shooter_rig();
    motor.set_reading(Signal::BusVoltage, 12.0);
    motor.set_reading(Signal::AppliedOutput, 0.5);
    let first = io.update_inputs(&ShooterInputs::default());
    assert_eq!(first.flywheel.voltage, Volts(6.0));

    motor.set_reading(Signal::AppliedOutput, 1.0);
    motor.fail_reading(Signal::BusVoltage);
    let second = io.update_inputs(&first);
    assert_eq!(second.flywheel.voltage, Volts(6.0));
}

#[test]
fn test_limit_switch_failure_retained() {
    let mut rig = intake_rig(IntakeConstants::default());
    rig.switch.set(Ok(true));
    let first = rig.io.update_inputs(&IntakeInputs::default());
    assert!(first.upper_limit_switch);

    rig.switch.set(Err(MotorError::Timeout));
    let second = rig.io.update_inputs(&first);
    assert!(second.upper_limit_switch);
}

#[test]
fn test_stop_clears_integral_before_stopping() {
    let (motor, mut io) = shooter_rig();
    io.set_flywheel_velocity(RadPerSec(50.0));
    io.stop_flywheel();

    let commands = motor.commands();
    assert_eq!(
        &commands[1..],
        &[MockCall::IntegralAccumulator(0.0), MockCall::Stop]
    );
}

#[test]
fn test_flywheel_reference_in_motor_rpm() {
    let (motor, mut io) = shooter_rig();
    io.set_flywheel_velocity(RadPerSec(50.0));

    let MockCall::Reference(rpm, ControlType::Velocity) = motor.commands()[0] else {
        panic!("expected velocity reference");
    };
    assert!((rpm - 50.0 * 60.0 / TAU * 2.0).abs() < 1e-9);
}

#[test]
fn test_rejected_commands_are_absorbed() {
    let (motor, mut io) = shooter_rig();
    motor.reject_commands(true);

    io.set_flywheel_velocity(RadPerSec(50.0));
    io.set_flywheel_duty_cycle(DutyCycle::new(0.2));
    io.stop_flywheel();
    assert_eq!(motor.commands().len(), 4);
}

#[test]
fn test_duty_families_pass_through() {
    let feeder_motor = MockMotor::new();
    let climber_motor = MockMotor::new();
    let mut feeder = RealFeederIo::new(feeder_motor.clone(), &FeederConstants::default());
    let mut climber = RealClimberIo::new(climber_motor.clone(), &ClimberConstants::default());

    feeder.set_duty_cycle(DutyCycle::new(1.0));
    climber.set_duty_cycle(DutyCycle::new(-0.4));
    climber.set_duty_cycle(DutyCycle::ZERO);

    assert_eq!(feeder_motor.commands(), vec![MockCall::DutyCycle(1.0)]);
    assert_eq!(
        climber_motor.commands(),
        vec![MockCall::DutyCycle(-0.4), MockCall::DutyCycle(0.0)]
    );
}

#[test]
fn test_boxed_backend() {
    let rig = intake_rig(IntakeConstants::default());
    let leader = rig.leader.clone();
    let mut boxed: Box<DynIntakeIo> = Box::new(rig.io);

    boxed.set_pivot_duty_cycle(DutyCycle::new(0.1));
    let _ = boxed.update_inputs(&IntakeInputs::default());
    assert_eq!(leader.commands(), vec![MockCall::DutyCycle(0.1)]);
}

#[test]
fn test_geometry_from_constants() {
    let constants = IntakeConstants {
        zero_offset_deg: 5.0,
        ..Default::default()
    };
    let g = PivotGeometry::from(&constants);
    assert!((g.to_encoder(Deg(0.0).to_rad()).to_deg().0 - 5.0).abs() < 1e-12);
}

#[derive(Debug, Clone)]
enum PivotCommand {
    Target(f64),
    Duty(f64),
}

fn pivot_command() -> impl Strategy<Value = PivotCommand> {
    prop_oneof![
        (-180.0f64..180.0).prop_map(PivotCommand::Target),
        (-1.0f64..1.0).prop_map(PivotCommand::Duty),
    ]
}

proptest! {
    /// 任意命令序列下，从电机收到的每条命令都是主电机命令乘以固定符号
    #[test]
    fn prop_follower_mirrors_every_command(
        opposed in any::<bool>(),
        commands in prop::collection::vec(pivot_command(), 1..20),
    ) {
        let mut rig = intake_rig(IntakeConstants { follower_opposed: opposed, ..Default::default() });
        let sign = if opposed { -1.0 } else { 1.0 };

        for command in &commands {
            match command {
                PivotCommand::Target(deg) => rig.io.set_pivot_target(Deg(*deg).to_rad()),
                PivotCommand::Duty(d) => rig.io.set_pivot_duty_cycle(DutyCycle::new(*d)),
            }
        }

        let leader = rig.leader.commands();
        let follower = rig.follower.commands();
        prop_assert_eq!(leader.len(), commands.len());
        prop_assert_eq!(follower.len(), commands.len());
        for (l, f) in leader.iter().zip(&follower) {
            match (l, f) {
                (MockCall::DutyCycle(l), MockCall::DutyCycle(f)) => prop_assert_eq!(*f, sign * *l),
                (MockCall::Reference(l, lc), MockCall::Reference(f, fc)) => {
                    prop_assert_eq!(lc, fc);
                    prop_assert_eq!(*f, sign * *l);
                },
                other => prop_assert!(false, "mismatched calls {:?}", other),
            }
        }
    }
}
