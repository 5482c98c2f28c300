//! 各机构电机配置
//!
//! Real 与 Sim 后端使用同一份配置。闭环增益取构造时的当前值，
//! 之后在线修改增益不会影响已写入控制器的配置。

use crate::motor::{EncoderConversion, IdleMode, MotorConfig, PidfGains};
use mech_config::{ClimberConstants, FeederConstants, IntakeConfig, ShooterConfig};
use mech_units::{Amps, Volts};

const NOMINAL_VOLTAGE: Volts = Volts(12.0);

/// 进气臂俯仰电机（主、从共用）
pub fn intake_pivot(config: &IntakeConfig) -> MotorConfig {
    let c = &config.constants;
    let t = &config.tunables;
    MotorConfig::new()
        .inverted(c.leader_inverted)
        .idle_mode(IdleMode::Brake)
        .smart_current_limit(c.pivot_smart_current_limit)
        .secondary_current_limit(c.pivot_secondary_limit())
        .voltage_compensation(NOMINAL_VOLTAGE)
        .closed_loop(PidfGains::new(t.pivot_kp.get(), t.pivot_ki.get(), t.pivot_kd.get(), 0.0))
        .encoder(EncoderConversion::for_gear_ratio(c.pivot_gear_ratio))
}

/// 进气滚轮电机
pub fn intake_roller(config: &IntakeConfig) -> MotorConfig {
    let c = &config.constants;
    MotorConfig::new()
        .inverted(c.roller_inverted)
        .idle_mode(IdleMode::Brake)
        .smart_current_limit(c.roller_smart_current_limit)
        .secondary_current_limit(c.roller_secondary_limit())
        .voltage_compensation(NOMINAL_VOLTAGE)
        .encoder(EncoderConversion::for_gear_ratio(c.roller_gear_ratio))
}

/// 飞轮电机（滑行）
pub fn flywheel(config: &ShooterConfig) -> MotorConfig {
    let c = &config.constants;
    let t = &config.tunables;
    MotorConfig::new()
        .inverted(c.flywheel_inverted)
        .idle_mode(IdleMode::Coast)
        .smart_current_limit(c.flywheel_smart_current_limit)
        .secondary_current_limit(Amps(c.flywheel_secondary_current_limit))
        .voltage_compensation(NOMINAL_VOLTAGE)
        .closed_loop(PidfGains::new(
            t.flywheel_kp.get(),
            t.flywheel_ki.get(),
            t.flywheel_kd.get(),
            t.flywheel_ff.get(),
        ))
        .encoder(EncoderConversion::for_gear_ratio(c.flywheel_gear_ratio))
}

/// 送料电机
pub fn feeder(constants: &FeederConstants) -> MotorConfig {
    MotorConfig::new()
        .inverted(constants.inverted)
        .idle_mode(IdleMode::Brake)
        .smart_current_limit(constants.smart_current_limit)
        .secondary_current_limit(Amps(constants.secondary_current_limit))
        .voltage_compensation(NOMINAL_VOLTAGE)
}

/// 爬升电机
pub fn climber(constants: &ClimberConstants) -> MotorConfig {
    MotorConfig::new()
        .inverted(constants.inverted)
        .idle_mode(IdleMode::Brake)
        .smart_current_limit(constants.smart_current_limit)
        .secondary_current_limit(Amps(constants.secondary_current_limit))
        .voltage_compensation(NOMINAL_VOLTAGE)
}
