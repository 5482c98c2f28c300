//! 送料器与爬升机构控制器测试

mod common;

use common::mock_io::{IoCall, MockIo};
use mech_hal::{ClimberInputs, FeederInputs};
use mech_subsystems::{Climber, Feeder, Subsystem};
use mech_telemetry::MemorySink;
use mech_units::DutyCycle;

#[test]
fn test_feeder_set_and_stop() {
    let io = MockIo::<FeederInputs>::new();
    let mut feeder = Feeder::new(io.clone());

    feeder.set_speed(DutyCycle::new(0.7));
    assert_eq!(feeder.speed(), DutyCycle::new(0.7));
    feeder.stop();
    feeder.stop();

    assert_eq!(
        io.calls(),
        vec![
            IoCall::Duty(DutyCycle::new(0.7)),
            IoCall::Duty(DutyCycle::ZERO),
            IoCall::Duty(DutyCycle::ZERO),
        ]
    );
    assert_eq!(feeder.speed(), DutyCycle::ZERO);
}

#[test]
fn test_climber_set_and_stop() {
    let io = MockIo::<ClimberInputs>::new();
    let mut climber = Climber::new(io.clone());

    climber.set_speed(DutyCycle::new(-1.0));
    Subsystem::stop(&mut climber);

    assert_eq!(
        io.calls(),
        vec![IoCall::Duty(DutyCycle::FULL_REVERSE), IoCall::Duty(DutyCycle::ZERO)]
    );
}

#[test]
fn test_periodic_publishes_snapshot() {
    let io = MockIo::<FeederInputs>::new();
    let mut inputs = FeederInputs::default();
    inputs.motor.current = mech_units::Amps(12.5);
    io.feed(inputs);

    let mut feeder = Feeder::new(io.clone());
    feeder.set_speed(DutyCycle::new(0.4));
    let mut sink = MemorySink::new();
    feeder.periodic(&mut sink);

    assert_eq!(sink.number("Feeder/motor/current"), Some(12.5));
    assert_eq!(sink.number("Feeder/Desired-Speed"), Some(0.4));
    assert_eq!(feeder.inputs(), &inputs);
    assert_eq!(feeder.name(), "Feeder");
}
