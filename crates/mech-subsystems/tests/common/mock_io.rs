//! Mock 执行器后端
//!
//! 记录控制器下发的命令；`update_inputs` 返回测试脚本化的快照。
//! 句柄可克隆，测试保留一份用于注入与观察。

use mech_hal::{
    ActuatorIo, ClimberInputs, ClimberIo, FeederInputs, FeederIo, IntakeInputs, IntakeIo,
    ShooterInputs, ShooterIo,
};
use mech_units::{DutyCycle, Rad, RadPerSec};
use std::sync::{Arc, Mutex};

/// 一次后端命令
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IoCall {
    PivotTarget(Rad),
    PivotDuty(DutyCycle),
    RollerDuty(DutyCycle),
    FlywheelVelocity(RadPerSec),
    FlywheelDuty(DutyCycle),
    StopFlywheel,
    Duty(DutyCycle),
}

#[derive(Debug)]
struct MockState<T> {
    calls: Vec<IoCall>,
    next: Option<T>,
    updates: usize,
}

/// Mock 后端（任意快照类型）
#[derive(Debug)]
pub struct MockIo<T> {
    state: Arc<Mutex<MockState<T>>>,
}

impl<T> Clone for MockIo<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for MockIo<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                calls: Vec::new(),
                next: None,
                updates: 0,
            })),
        }
    }
}

impl<T: Copy> MockIo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 之后每次 `update_inputs` 返回该快照
    pub fn feed(&self, inputs: T) {
        self.state.lock().unwrap().next = Some(inputs);
    }

    /// 之后 `update_inputs` 沿用上一快照（模拟全部读取失败）
    pub fn starve(&self) {
        self.state.lock().unwrap().next = None;
    }

    pub fn calls(&self) -> Vec<IoCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn last_call(&self) -> Option<IoCall> {
        self.state.lock().unwrap().calls.last().copied()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn updates(&self) -> usize {
        self.state.lock().unwrap().updates
    }

    fn push(&self, call: IoCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl<T: Copy + Default> ActuatorIo for MockIo<T> {
    type Inputs = T;

    fn update_inputs(&mut self, previous: &T) -> T {
        let mut state = self.state.lock().unwrap();
        state.updates += 1;
        state.next.unwrap_or(*previous)
    }
}

impl IntakeIo for MockIo<IntakeInputs> {
    fn set_pivot_target(&mut self, encoder_angle: Rad) {
        self.push(IoCall::PivotTarget(encoder_angle));
    }

    fn set_pivot_duty_cycle(&mut self, duty: DutyCycle) {
        self.push(IoCall::PivotDuty(duty));
    }

    fn set_roller_duty_cycle(&mut self, duty: DutyCycle) {
        self.push(IoCall::RollerDuty(duty));
    }
}

impl ShooterIo for MockIo<ShooterInputs> {
    fn set_flywheel_velocity(&mut self, velocity: RadPerSec) {
        self.push(IoCall::FlywheelVelocity(velocity));
    }

    fn set_flywheel_duty_cycle(&mut self, duty: DutyCycle) {
        self.push(IoCall::FlywheelDuty(duty));
    }

    fn stop_flywheel(&mut self) {
        self.push(IoCall::StopFlywheel);
    }
}

impl FeederIo for MockIo<FeederInputs> {
    fn set_duty_cycle(&mut self, duty: DutyCycle) {
        self.push(IoCall::Duty(duty));
    }
}

impl ClimberIo for MockIo<ClimberInputs> {
    fn set_duty_cycle(&mut self, duty: DutyCycle) {
        self.push(IoCall::Duty(duty));
    }
}

/// 飞轮速度为 `velocity` 的射手快照
pub fn shooter_at(velocity: RadPerSec) -> ShooterInputs {
    let mut inputs = ShooterInputs::default();
    inputs.flywheel.velocity = velocity;
    inputs
}
