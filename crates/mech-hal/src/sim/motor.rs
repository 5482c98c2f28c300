//! 仿真电机控制器
//!
//! 行为上等价于一台带板载 PIDF 的智能控制器：保存最近一次命令与配置，
//! 传感器值由物理模型写入。`SimMotor` 是可克隆的共享句柄，测试可以保留一份
//! 克隆来注入故障或观察命令。

use crate::error::{MotorError, Signal};
use crate::motor::{ControlType, MotorConfig, MotorController};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

/// 控制器当前执行的命令
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MotorCommand {
    /// 无输出
    #[default]
    Stopped,
    /// 开环占空比
    DutyCycle(f64),
    /// 位置闭环（电机转数）
    Position(f64),
    /// 速度闭环（电机 RPM）
    Velocity(f64),
}

/// 物理模型写入的传感器值（原始单位）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimSensors {
    pub temperature: f64,
    pub bus_voltage: f64,
    pub applied_output: f64,
    pub output_current: f64,
    pub position: f64,
    pub velocity: f64,
}

impl Default for SimSensors {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            bus_voltage: 12.0,
            applied_output: 0.0,
            output_current: 0.0,
            position: 0.0,
            velocity: 0.0,
        }
    }
}

#[derive(Debug, Default)]
struct SimMotorState {
    config: Option<MotorConfig>,
    command: MotorCommand,
    integral: f64,
    last_error: Option<f64>,
    sensors: SimSensors,
    withheld: BTreeSet<Signal>,
    configure_failures: u32,
    configure_calls: u32,
}

/// 仿真电机
#[derive(Debug, Clone, Default)]
pub struct SimMotor {
    state: Arc<Mutex<SimMotorState>>,
}

impl SimMotor {
    /// 创建未配置的仿真电机
    pub fn new() -> Self {
        Self::default()
    }

    /// 下一次读取 `signal` 时失败一次
    pub fn withhold(&self, signal: Signal) {
        self.state.lock().withheld.insert(signal);
    }

    /// 接下来 `count` 次 `configure` 返回超时
    pub fn fail_configures(&self, count: u32) {
        self.state.lock().configure_failures = count;
    }

    /// `configure` 被调用的次数（含失败）
    pub fn configure_calls(&self) -> u32 {
        self.state.lock().configure_calls
    }

    /// 最近一次成功写入的配置
    pub fn config(&self) -> Option<MotorConfig> {
        self.state.lock().config.clone()
    }

    /// 当前命令
    pub fn command(&self) -> MotorCommand {
        self.state.lock().command
    }

    /// 当前积分累加器
    pub fn integral_accumulator(&self) -> f64 {
        self.state.lock().integral
    }

    /// 当前传感器值
    pub fn sensors(&self) -> SimSensors {
        self.state.lock().sensors
    }

    /// 物理模型写入传感器值
    pub fn set_sensors(&self, sensors: SimSensors) {
        self.state.lock().sensors = sensors;
    }

    /// 板载控制器一个周期的输出占空比
    ///
    /// ```text
    /// Position: out = kP·e + kI·∫e + kD·ė
    /// Velocity: out = kFF·target + kP·e + kI·∫e + kD·ė
    /// ```
    ///
    /// 未配置增益时闭环命令输出为 0。
    pub fn closed_loop_output(&self, dt_s: f64) -> f64 {
        let mut state = self.state.lock();
        let gains = state.config.as_ref().and_then(MotorConfig::gains);

        let (target, measured, feedforward) = match state.command {
            MotorCommand::Stopped => return 0.0,
            MotorCommand::DutyCycle(duty) => return duty,
            MotorCommand::Position(target) => (target, state.sensors.position, 0.0),
            MotorCommand::Velocity(target) => (target, state.sensors.velocity, target),
        };
        let Some(gains) = gains else {
            return 0.0;
        };

        let error = target - measured;
        state.integral += error * dt_s;
        let derivative = match state.last_error {
            Some(last) if dt_s > 0.0 => (error - last) / dt_s,
            _ => 0.0,
        };
        state.last_error = Some(error);

        let output = gains.kff * feedforward
            + gains.kp * error
            + gains.ki * state.integral
            + gains.kd * derivative;
        output.clamp(-1.0, 1.0)
    }

    fn read(&self, signal: Signal, pick: impl FnOnce(&SimSensors) -> f64) -> Result<f64, MotorError> {
        let mut state = self.state.lock();
        if state.withheld.remove(&signal) {
            return Err(MotorError::Stale(signal));
        }
        Ok(pick(&state.sensors))
    }
}

impl MotorController for SimMotor {
    fn configure(&mut self, config: &MotorConfig) -> Result<(), MotorError> {
        let mut state = self.state.lock();
        state.configure_calls += 1;
        if state.configure_failures > 0 {
            state.configure_failures -= 1;
            return Err(MotorError::Timeout);
        }
        state.config = Some(config.clone());
        Ok(())
    }

    fn set_reference(&mut self, value: f64, control: ControlType) -> Result<(), MotorError> {
        let mut state = self.state.lock();
        let command = match control {
            ControlType::Position => MotorCommand::Position(value),
            ControlType::Velocity => MotorCommand::Velocity(value),
        };
        if std::mem::discriminant(&command) != std::mem::discriminant(&state.command) {
            state.last_error = None;
        }
        state.command = command;
        Ok(())
    }

    fn set_duty_cycle(&mut self, duty: f64) -> Result<(), MotorError> {
        self.state.lock().command = MotorCommand::DutyCycle(duty.clamp(-1.0, 1.0));
        Ok(())
    }

    fn set_integral_accumulator(&mut self, value: f64) -> Result<(), MotorError> {
        self.state.lock().integral = value;
        Ok(())
    }

    fn stop_motor(&mut self) {
        let mut state = self.state.lock();
        state.command = MotorCommand::Stopped;
        state.last_error = None;
    }

    fn temperature(&self) -> Result<f64, MotorError> {
        self.read(Signal::Temperature, |s| s.temperature)
    }

    fn bus_voltage(&self) -> Result<f64, MotorError> {
        self.read(Signal::BusVoltage, |s| s.bus_voltage)
    }

    fn applied_output(&self) -> Result<f64, MotorError> {
        self.read(Signal::AppliedOutput, |s| s.applied_output)
    }

    fn output_current(&self) -> Result<f64, MotorError> {
        self.read(Signal::OutputCurrent, |s| s.output_current)
    }

    fn position(&self) -> Result<f64, MotorError> {
        self.read(Signal::Position, |s| s.position)
    }

    fn velocity(&self) -> Result<f64, MotorError> {
        self.read(Signal::Velocity, |s| s.velocity)
    }
}

/// 仿真数字输入
#[derive(Debug, Clone, Default)]
pub struct SimDigitalInput {
    state: Arc<Mutex<(bool, bool)>>,
}

impl SimDigitalInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置电平
    pub fn set(&self, value: bool) {
        self.state.lock().0 = value;
    }

    /// 下一次读取失败一次
    pub fn withhold(&self) {
        self.state.lock().1 = true;
    }
}

impl crate::motor::DigitalInput for SimDigitalInput {
    fn get(&self) -> Result<bool, MotorError> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.1) {
            return Err(MotorError::Stale(Signal::DigitalInput));
        }
        Ok(state.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::PidfGains;

    #[test]
    fn test_withhold_is_one_shot() {
        let motor = SimMotor::new();
        motor.set_sensors(SimSensors {
            velocity: 100.0,
            ..Default::default()
        });
        motor.withhold(Signal::Velocity);

        assert_eq!(motor.velocity(), Err(MotorError::Stale(Signal::Velocity)));
        assert_eq!(motor.velocity(), Ok(100.0));
        assert_eq!(motor.position(), Ok(0.0));
    }

    #[test]
    fn test_configure_failures() {
        let mut motor = SimMotor::new();
        motor.fail_configures(2);
        let config = MotorConfig::new();

        assert!(motor.configure(&config).is_err());
        assert!(motor.configure(&config).is_err());
        assert!(motor.configure(&config).is_ok());
        assert_eq!(motor.configure_calls(), 3);
        assert_eq!(motor.config(), Some(config));
    }

    #[test]
    fn test_velocity_feedforward() {
        let mut motor = SimMotor::new();
        motor
            .configure(&MotorConfig::new().closed_loop(PidfGains::new(0.0, 0.0, 0.0, 0.0002)))
            .unwrap();
        motor.set_reference(2500.0, ControlType::Velocity).unwrap();
        assert!((motor.closed_loop_output(0.02) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_integral_reset() {
        let mut motor = SimMotor::new();
        motor
            .configure(&MotorConfig::new().closed_loop(PidfGains::new(0.0, 1.0, 0.0, 0.0)))
            .unwrap();
        motor.set_reference(100.0, ControlType::Velocity).unwrap();
        motor.closed_loop_output(0.02);
        assert!(motor.integral_accumulator() > 0.0);

        motor.set_integral_accumulator(0.0).unwrap();
        assert_eq!(motor.integral_accumulator(), 0.0);
    }

    #[test]
    fn test_closed_loop_without_gains() {
        let mut motor = SimMotor::new();
        motor.set_reference(100.0, ControlType::Velocity).unwrap();
        assert_eq!(motor.closed_loop_output(0.02), 0.0);
        motor.set_duty_cycle(1.5).unwrap();
        assert_eq!(motor.closed_loop_output(0.02), 1.0);
    }

    #[test]
    fn test_digital_input_withhold() {
        use crate::motor::DigitalInput;
        let input = SimDigitalInput::new();
        input.set(true);
        input.withhold();
        assert!(input.get().is_err());
        assert_eq!(input.get(), Ok(true));
    }
}
