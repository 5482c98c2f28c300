//! Mock 电机控制器
//!
//! 记录所有调用，读取值与失败由测试脚本化。

use mech_hal::{ControlType, DigitalInput, MotorConfig, MotorController, MotorError, Signal};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

/// 一次控制器调用
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Configure,
    Reference(f64, ControlType),
    DutyCycle(f64),
    IntegralAccumulator(f64),
    Stop,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    config: Option<MotorConfig>,
    readings: BTreeMap<Signal, f64>,
    failing: BTreeSet<Signal>,
    configure_failures: u32,
    reject_commands: bool,
}

/// Mock 电机（可克隆的共享句柄）
#[derive(Debug, Clone, Default)]
pub struct MockMotor {
    state: Arc<Mutex<MockState>>,
}

impl MockMotor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置某个信号的读数
    pub fn set_reading(&self, signal: Signal, value: f64) {
        self.state.lock().unwrap().readings.insert(signal, value);
    }

    /// 某个信号持续读取失败，直到 `restore`
    pub fn fail_reading(&self, signal: Signal) {
        self.state.lock().unwrap().failing.insert(signal);
    }

    pub fn restore(&self, signal: Signal) {
        self.state.lock().unwrap().failing.remove(&signal);
    }

    /// 接下来 `count` 次 configure 失败
    pub fn fail_configures(&self, count: u32) {
        self.state.lock().unwrap().configure_failures = count;
    }

    /// 所有命令返回 Rejected
    pub fn reject_commands(&self, reject: bool) {
        self.state.lock().unwrap().reject_commands = reject;
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// 除 Configure 以外的调用
    pub fn commands(&self) -> Vec<MockCall> {
        self.calls().into_iter().filter(|c| *c != MockCall::Configure).collect()
    }

    pub fn configure_count(&self) -> usize {
        self.calls().iter().filter(|c| **c == MockCall::Configure).count()
    }

    pub fn config(&self) -> Option<MotorConfig> {
        self.state.lock().unwrap().config.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn command(&self, call: MockCall) -> Result<(), MotorError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.reject_commands {
            return Err(MotorError::Rejected("mock".into()));
        }
        Ok(())
    }

    fn read(&self, signal: Signal) -> Result<f64, MotorError> {
        let state = self.state.lock().unwrap();
        if state.failing.contains(&signal) {
            return Err(MotorError::Stale(signal));
        }
        Ok(state.readings.get(&signal).copied().unwrap_or(0.0))
    }
}

impl MotorController for MockMotor {
    fn configure(&mut self, config: &MotorConfig) -> Result<(), MotorError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::Configure);
        if state.configure_failures > 0 {
            state.configure_failures -= 1;
            return Err(MotorError::CanFault("no ack".into()));
        }
        state.config = Some(config.clone());
        Ok(())
    }

    fn set_reference(&mut self, value: f64, control: ControlType) -> Result<(), MotorError> {
        self.command(MockCall::Reference(value, control))
    }

    fn set_duty_cycle(&mut self, duty: f64) -> Result<(), MotorError> {
        self.command(MockCall::DutyCycle(duty))
    }

    fn set_integral_accumulator(&mut self, value: f64) -> Result<(), MotorError> {
        self.command(MockCall::IntegralAccumulator(value))
    }

    fn stop_motor(&mut self) {
        self.state.lock().unwrap().calls.push(MockCall::Stop);
    }

    fn temperature(&self) -> Result<f64, MotorError> {
        self.read(Signal::Temperature)
    }

    fn bus_voltage(&self) -> Result<f64, MotorError> {
        self.read(Signal::BusVoltage)
    }

    fn applied_output(&self) -> Result<f64, MotorError> {
        self.read(Signal::AppliedOutput)
    }

    fn output_current(&self) -> Result<f64, MotorError> {
        self.read(Signal::OutputCurrent)
    }

    fn position(&self) -> Result<f64, MotorError> {
        self.read(Signal::Position)
    }

    fn velocity(&self) -> Result<f64, MotorError> {
        self.read(Signal::Velocity)
    }
}

/// Mock 数字输入
#[derive(Debug, Clone)]
pub struct MockSwitch {
    state: Arc<Mutex<Result<bool, MotorError>>>,
}

impl MockSwitch {
    pub fn new(value: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(Ok(value))),
        }
    }

    pub fn set(&self, value: Result<bool, MotorError>) {
        *self.state.lock().unwrap() = value;
    }
}

impl DigitalInput for MockSwitch {
    fn get(&self) -> Result<bool, MotorError> {
        self.state.lock().unwrap().clone()
    }
}
