//! 机构物理模型
//!
//! 都是一阶近似：速度以时间常数 `tau` 追随 `duty × free_speed`。
//! 电流按反电动势差近似，温度按 I²R 发热与向环境散热近似。

use super::motor::SimSensors;
use mech_units::{Deg, Rad, RadPerSec};

/// 无刷电机空载转速（RPM）
pub const FREE_SPEED_RPM: f64 = 5676.0;
/// 无刷电机堵转电流（A）
pub const STALL_CURRENT: f64 = 105.0;
const AMBIENT_C: f64 = 25.0;
const NOMINAL_BUS_V: f64 = 12.0;
const BUS_RESISTANCE_OHM: f64 = 0.015;
const HEATING_C_PER_A2S: f64 = 0.0004;
const COOLING_PER_S: f64 = 0.02;

/// 绕组温度
#[derive(Debug, Clone, Copy)]
struct Thermal {
    celsius: f64,
}

impl Default for Thermal {
    fn default() -> Self {
        Self { celsius: AMBIENT_C }
    }
}

impl Thermal {
    fn step(&mut self, current: f64, dt_s: f64) -> f64 {
        let heating = HEATING_C_PER_A2S * current * current;
        let cooling = COOLING_PER_S * (self.celsius - AMBIENT_C);
        self.celsius += (heating - cooling) * dt_s;
        self.celsius
    }
}

/// 一阶滞后系数，保证单步不越过目标
#[inline]
fn lag(dt_s: f64, tau_s: f64) -> f64 {
    (dt_s / tau_s).min(1.0)
}

/// 电流近似：堵转电流 × |占空比 - 归一化速度|
#[inline]
fn current_draw(duty: f64, normalized_speed: f64, limit: f64) -> f64 {
    (STALL_CURRENT * (duty - normalized_speed).abs()).min(limit)
}

/// 一阶滞后的旋转负载（电机端原始单位）
#[derive(Debug, Clone)]
struct Spinner {
    tau_s: f64,
    free_speed_rpm: f64,
    current_limit: f64,
    velocity_rpm: f64,
    position_rot: f64,
    thermal: Thermal,
}

impl Spinner {
    fn new(tau_s: f64, free_speed_rpm: f64) -> Self {
        Self {
            tau_s,
            free_speed_rpm,
            current_limit: STALL_CURRENT,
            velocity_rpm: 0.0,
            position_rot: 0.0,
            thermal: Thermal::default(),
        }
    }

    fn step(&mut self, duty: f64, dt_s: f64) -> SimSensors {
        let duty = duty.clamp(-1.0, 1.0);
        let target = duty * self.free_speed_rpm;
        self.velocity_rpm += (target - self.velocity_rpm) * lag(dt_s, self.tau_s);
        self.position_rot += self.velocity_rpm / 60.0 * dt_s;

        let current = current_draw(duty, self.velocity_rpm / self.free_speed_rpm, self.current_limit);
        SimSensors {
            temperature: self.thermal.step(current, dt_s),
            bus_voltage: NOMINAL_BUS_V - BUS_RESISTANCE_OHM * current,
            applied_output: duty,
            output_current: current,
            position: self.position_rot,
            velocity: self.velocity_rpm,
        }
    }
}

/// 飞轮：惯量大，时间常数长
///
/// 空载转速按速度前馈标定（`kFF = 1 / free_speed`），使纯前馈时稳态等于目标。
#[derive(Debug, Clone)]
pub struct FlywheelSim {
    inner: Spinner,
}

impl FlywheelSim {
    /// 飞轮时间常数（s）
    pub const TAU_S: f64 = 0.25;

    /// 按速度前馈增益标定；`kff <= 0` 时使用电机空载转速
    pub fn new(kff: f64) -> Self {
        let free_speed = if kff > 0.0 { 1.0 / kff } else { FREE_SPEED_RPM };
        Self {
            inner: Spinner::new(Self::TAU_S, free_speed),
        }
    }

    /// 电流上限
    pub fn with_current_limit(mut self, amps: f64) -> Self {
        self.inner.current_limit = amps;
        self
    }

    /// 推进一步
    pub fn step(&mut self, duty: f64, dt_s: f64) -> SimSensors {
        self.inner.step(duty, dt_s)
    }

    /// 空载转速（电机 RPM），即满占空比下的稳态转速
    pub fn free_speed_rpm(&self) -> f64 {
        self.inner.free_speed_rpm
    }

    /// 当前电机转速（RPM）
    pub fn velocity_rpm(&self) -> f64 {
        self.inner.velocity_rpm
    }
}

/// 滚轮：轻负载，时间常数短
#[derive(Debug, Clone)]
pub struct RollerSim {
    inner: Spinner,
}

impl Default for RollerSim {
    fn default() -> Self {
        Self::new()
    }
}

impl RollerSim {
    /// 滚轮时间常数（s）
    pub const TAU_S: f64 = 0.05;

    pub fn new() -> Self {
        Self {
            inner: Spinner::new(Self::TAU_S, FREE_SPEED_RPM),
        }
    }

    /// 电流上限
    pub fn with_current_limit(mut self, amps: f64) -> Self {
        self.inner.current_limit = amps;
        self
    }

    /// 推进一步
    pub fn step(&mut self, duty: f64, dt_s: f64) -> SimSensors {
        self.inner.step(duty, dt_s)
    }
}

/// 俯仰驱动方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArmDrive {
    /// 位置目标（机构坐标），由模型内 PD 跟踪
    Target(Rad),
    /// 开环占空比
    Duty(f64),
}

/// 俯仰臂一步后的状态（机构坐标）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmState {
    pub angle: Rad,
    pub velocity: RadPerSec,
    pub applied_output: f64,
    pub current: f64,
    pub temperature: f64,
    pub bus_voltage: f64,
}

/// 俯仰臂
///
/// 角度被限制在 `[min, max]` 硬止挡内；`min` 附近触发上限位开关。
#[derive(Debug, Clone)]
pub struct ArmSim {
    min: Rad,
    max: Rad,
    kp: f64,
    kd: f64,
    max_speed: RadPerSec,
    tau_s: f64,
    current_limit: f64,
    angle: Rad,
    velocity: RadPerSec,
    thermal: Thermal,
}

impl ArmSim {
    /// 上限位开关触发窗口
    pub const LIMIT_SWITCH_WINDOW: Deg = Deg(1.0);

    /// 在 `start` 处静止的俯仰臂
    pub fn new(min: Rad, max: Rad, start: Rad) -> Self {
        Self {
            min,
            max,
            kp: 4.0,
            kd: 0.3,
            max_speed: RadPerSec(6.0),
            tau_s: 0.08,
            current_limit: STALL_CURRENT,
            angle: start.clamp(min, max),
            velocity: RadPerSec::ZERO,
            thermal: Thermal::default(),
        }
    }

    /// PD 增益（占空比 / rad，占空比 / (rad/s)）
    pub fn with_gains(mut self, kp: f64, kd: f64) -> Self {
        self.kp = kp;
        self.kd = kd;
        self
    }

    /// 电流上限
    pub fn with_current_limit(mut self, amps: f64) -> Self {
        self.current_limit = amps;
        self
    }

    pub fn angle(&self) -> Rad {
        self.angle
    }

    /// 上限位开关状态
    pub fn upper_limit_triggered(&self) -> bool {
        self.angle <= self.min + Self::LIMIT_SWITCH_WINDOW.to_rad()
    }

    /// 推进一步
    pub fn step(&mut self, drive: ArmDrive, dt_s: f64) -> ArmState {
        let duty = match drive {
            ArmDrive::Target(target) => {
                let target = target.clamp(self.min, self.max);
                self.kp * (target - self.angle).0 - self.kd * self.velocity.0
            },
            ArmDrive::Duty(duty) => duty,
        }
        .clamp(-1.0, 1.0);

        let commanded = self.max_speed * duty;
        self.velocity += (commanded - self.velocity) * lag(dt_s, self.tau_s);
        self.angle += Rad(self.velocity.0 * dt_s);

        if self.angle < self.min {
            self.angle = self.min;
            self.velocity = RadPerSec::ZERO;
        } else if self.angle > self.max {
            self.angle = self.max;
            self.velocity = RadPerSec::ZERO;
        }

        let current = current_draw(duty, self.velocity.0 / self.max_speed.0, self.current_limit);
        ArmState {
            angle: self.angle,
            velocity: self.velocity,
            applied_output: duty,
            current,
            temperature: self.thermal.step(current, dt_s),
            bus_voltage: NOMINAL_BUS_V - BUS_RESISTANCE_OHM * current,
        }
    }
}
