use super::SIM_DT;
use super::motor::SimMotor;
use super::physics::FlywheelSim;
use crate::configure::{CONFIGURE_ATTEMPTS, absorb, try_until_ok};
use crate::inputs::ShooterInputs;
use crate::io::{ActuatorIo, ShooterIo};
use crate::motor::{ControlType, EncoderConversion, MotorController};
use crate::presets;
use crate::sample::sample_motor;
use mech_config::ShooterConfig;
use mech_units::{DutyCycle, RadPerSec, Rpm};
use std::time::Duration;

/// 仿真射手
///
/// 速度闭环在 [`SimMotor`] 内运行（含积分累加器），飞轮模型只负责动力学。
pub struct SimShooterIo {
    flywheel: SimMotor,
    sim: FlywheelSim,
    conversion: EncoderConversion,
    dt: Duration,
}

impl SimShooterIo {
    /// 使用新的仿真电机
    pub fn new(config: &ShooterConfig) -> Self {
        Self::with_motor(SimMotor::new(), config)
    }

    /// 使用给定的仿真电机
    pub fn with_motor(mut flywheel: SimMotor, config: &ShooterConfig) -> Self {
        let motor_config = presets::flywheel(config);
        try_until_ok("flywheel", CONFIGURE_ATTEMPTS, || flywheel.configure(&motor_config));

        let kff = motor_config.gains().map_or(0.0, |g| g.kff);
        let limit = motor_config.get_secondary_current_limit().value();
        let conversion = motor_config.conversion();
        let sim = FlywheelSim::new(kff).with_current_limit(limit);

        let max_raw = conversion
            .raw_velocity(Rpm(config.tunables.max_speed_rpm.get()).to_rad_per_sec())
            .abs();
        if sim.free_speed_rpm() < max_raw {
            tracing::warn!(
                kff,
                free_speed_rpm = sim.free_speed_rpm(),
                required_rpm = max_raw,
                "flywheel model cannot reach the maximum shooter speed"
            );
        }

        Self {
            flywheel,
            sim,
            conversion,
            dt: SIM_DT,
        }
    }

    /// 飞轮模型空载转速（电机 RPM）
    pub fn free_speed_rpm(&self) -> f64 {
        self.sim.free_speed_rpm()
    }

    /// 修改仿真步长
    pub fn with_dt(mut self, dt: Duration) -> Self {
        self.dt = dt;
        self
    }

    /// 飞轮电机
    pub fn flywheel_motor(&self) -> &SimMotor {
        &self.flywheel
    }
}

impl ActuatorIo for SimShooterIo {
    type Inputs = ShooterInputs;

    fn update_inputs(&mut self, previous: &ShooterInputs) -> ShooterInputs {
        let dt = self.dt.as_secs_f64();
        let duty = self.flywheel.closed_loop_output(dt);
        self.flywheel.set_sensors(self.sim.step(duty, dt));

        ShooterInputs {
            flywheel: sample_motor(&self.flywheel, &self.conversion, &previous.flywheel),
        }
    }
}

impl ShooterIo for SimShooterIo {
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
        absorb(
            "flywheel",
            "set_integral_accumulator",
            self.flywheel.set_integral_accumulator(0.0),
        );
        self.flywheel.stop_motor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::MotorCommand;
    use mech_config::{ShooterConstants, TunableStore};

    fn config(store: &TunableStore) -> ShooterConfig {
        ShooterConfig::new(ShooterConstants::default(), store)
    }

    #[test]
    fn test_spins_up_to_target() {
        let store = TunableStore::new();
        let mut io = SimShooterIo::new(&config(&store));
        let target = Rpm(1500.0).to_rad_per_sec();
        io.set_flywheel_velocity(target);

        let mut inputs = ShooterInputs::default();
        for _ in 0..100 {
            inputs = io.update_inputs(&inputs);
        }
        let error = (inputs.flywheel.velocity - target).abs() / target.0;
        assert!(error.0 < 0.05, "velocity {}", inputs.flywheel.velocity);
    }

    #[test]
    fn test_reaches_max_speed() {
        let store = TunableStore::new();
        let config = config(&store);
        let mut io = SimShooterIo::new(&config);
        let max = Rpm(config.tunables.max_speed_rpm.get()).to_rad_per_sec();
        assert!(io.free_speed_rpm() >= io.conversion.raw_velocity(max));

        io.set_flywheel_velocity(max);
        let mut inputs = ShooterInputs::default();
        for _ in 0..150 {
            inputs = io.update_inputs(&inputs);
        }
        let error = (inputs.flywheel.velocity - max).abs() / max.0;
        assert!(error.0 < 0.05, "velocity {}", inputs.flywheel.velocity.to_rpm());
    }

    #[test]
    fn test_stop_clears_integral() {
        let store = TunableStore::new();
        store.set("Shooter/FLYWHEEL_PID/kI", 0.0001).unwrap();
        let mut io = SimShooterIo::new(&config(&store));
        io.set_flywheel_velocity(RadPerSec(100.0));
        let mut inputs = ShooterInputs::default();
        for _ in 0..5 {
            inputs = io.update_inputs(&inputs);
        }
        assert!(io.flywheel_motor().integral_accumulator() != 0.0);

        io.stop_flywheel();
        assert_eq!(io.flywheel_motor().integral_accumulator(), 0.0);
        assert_eq!(io.flywheel_motor().command(), MotorCommand::Stopped);
    }

    #[test]
    fn test_configure_retried() {
        let store = TunableStore::new();
        let motor = SimMotor::new();
        motor.fail_configures(3);
        let io = SimShooterIo::with_motor(motor, &config(&store));
        assert_eq!(io.flywheel_motor().configure_calls(), 4);
        assert!(io.flywheel_motor().config().is_some());
    }

    #[test]
    fn test_configure_exhausted_does_not_panic() {
        let store = TunableStore::new();
        let motor = SimMotor::new();
        motor.fail_configures(10);
        let mut io = SimShooterIo::with_motor(motor, &config(&store));
        assert_eq!(io.flywheel_motor().configure_calls(), 5);
        assert!(io.flywheel_motor().config().is_none());

        // 未配置的控制器仍可被采样
        io.set_flywheel_velocity(RadPerSec(100.0));
        let inputs = io.update_inputs(&ShooterInputs::default());
        assert_eq!(inputs.flywheel.velocity, RadPerSec::ZERO);
    }
}
