//! 智能电机控制器抽象
//!
//! 对应一台带板载闭环的无刷电机控制器。所有读写都使用原始单位：
//! 位置为电机转数（rotations），速度为电机 RPM。物理单位换算由
//! [`EncoderConversion`] 在主机侧完成。

use crate::error::MotorError;
use mech_units::{Amps, Rad, RadPerSec, Volts};
use std::f64::consts::TAU;

/// 闭环控制类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlType {
    /// 位置闭环，参考值单位：电机转数
    Position,
    /// 速度闭环，参考值单位：电机 RPM
    Velocity,
}

/// 空闲（无输出）时的行为
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdleMode {
    /// 短接绕组制动
    #[default]
    Brake,
    /// 自由滑行
    Coast,
}

/// 板载闭环增益（原始单位）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidfGains {
    /// 比例增益
    pub kp: f64,
    /// 积分增益
    pub ki: f64,
    /// 微分增益
    pub kd: f64,
    /// 速度前馈增益
    pub kff: f64,
}

impl PidfGains {
    /// 创建增益
    pub fn new(kp: f64, ki: f64, kd: f64, kff: f64) -> Self {
        Self { kp, ki, kd, kff }
    }
}

/// 编码器换算系数
///
/// - `position_factor`: 电机转数 -> 机构弧度
/// - `velocity_factor`: 电机 RPM -> 机构 rad/s
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderConversion {
    /// 位置系数（rad / rotation）
    pub position_factor: f64,
    /// 速度系数（(rad/s) / RPM）
    pub velocity_factor: f64,
}

impl EncoderConversion {
    /// 直驱（减速比 1）
    pub const DIRECT: Self = Self {
        position_factor: TAU,
        velocity_factor: TAU / 60.0,
    };

    /// 按电机到末端的减速比计算
    ///
    /// ```rust
    /// use mech_hal::EncoderConversion;
    ///
    /// let c = EncoderConversion::for_gear_ratio(2.0);
    /// assert!((c.position_factor - std::f64::consts::PI).abs() < 1e-12);
    /// ```
    pub fn for_gear_ratio(ratio: f64) -> Self {
        Self {
            position_factor: TAU / ratio,
            velocity_factor: TAU / 60.0 / ratio,
        }
    }

    /// 电机转数 -> 机构角度
    #[inline]
    pub fn position(&self, rotations: f64) -> Rad {
        Rad(rotations * self.position_factor)
    }

    /// 电机 RPM -> 机构角速度
    #[inline]
    pub fn velocity(&self, rpm: f64) -> RadPerSec {
        RadPerSec(rpm * self.velocity_factor)
    }

    /// 机构角度 -> 电机转数
    #[inline]
    pub fn raw_position(&self, angle: Rad) -> f64 {
        angle.0 / self.position_factor
    }

    /// 机构角速度 -> 电机 RPM
    #[inline]
    pub fn raw_velocity(&self, velocity: RadPerSec) -> f64 {
        velocity.0 / self.velocity_factor
    }
}

impl Default for EncoderConversion {
    fn default() -> Self {
        Self::DIRECT
    }
}

/// 电机控制器配置
///
/// # 示例
///
/// ```rust
/// use mech_hal::{EncoderConversion, IdleMode, MotorConfig, PidfGains};
/// use mech_units::Amps;
///
/// let config = MotorConfig::new()
///     .inverted(true)
///     .idle_mode(IdleMode::Coast)
///     .smart_current_limit(100)
///     .secondary_current_limit(Amps(100.0))
///     .closed_loop(PidfGains::new(0.0, 0.0, 0.0, 0.00022))
///     .encoder(EncoderConversion::for_gear_ratio(2.0));
/// assert!(config.is_inverted());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MotorConfig {
    inverted: bool,
    idle_mode: IdleMode,
    smart_current_limit: u32,
    secondary_current_limit: Amps,
    voltage_compensation: Volts,
    gains: Option<PidfGains>,
    conversion: EncoderConversion,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            inverted: false,
            idle_mode: IdleMode::Brake,
            smart_current_limit: 40,
            secondary_current_limit: Amps(55.0),
            voltage_compensation: Volts(12.0),
            gains: None,
            conversion: EncoderConversion::DIRECT,
        }
    }
}

impl MotorConfig {
    /// 默认配置：不反转、制动、40 A / 55 A、12 V 电压补偿、无闭环
    pub fn new() -> Self {
        Self::default()
    }

    /// 输出方向反转
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// 空闲行为
    pub fn idle_mode(mut self, mode: IdleMode) -> Self {
        self.idle_mode = mode;
        self
    }

    /// smart 电流限制（A）
    pub fn smart_current_limit(mut self, limit: u32) -> Self {
        self.smart_current_limit = limit;
        self
    }

    /// 二级（硬）电流限制
    pub fn secondary_current_limit(mut self, limit: Amps) -> Self {
        self.secondary_current_limit = limit;
        self
    }

    /// 电压补偿基准
    pub fn voltage_compensation(mut self, nominal: Volts) -> Self {
        self.voltage_compensation = nominal;
        self
    }

    /// 板载闭环增益
    pub fn closed_loop(mut self, gains: PidfGains) -> Self {
        self.gains = Some(gains);
        self
    }

    /// 编码器换算
    pub fn encoder(mut self, conversion: EncoderConversion) -> Self {
        self.conversion = conversion;
        self
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn get_idle_mode(&self) -> IdleMode {
        self.idle_mode
    }

    pub fn get_smart_current_limit(&self) -> u32 {
        self.smart_current_limit
    }

    pub fn get_secondary_current_limit(&self) -> Amps {
        self.secondary_current_limit
    }

    pub fn get_voltage_compensation(&self) -> Volts {
        self.voltage_compensation
    }

    pub fn gains(&self) -> Option<PidfGains> {
        self.gains
    }

    pub fn conversion(&self) -> EncoderConversion {
        self.conversion
    }
}

/// 智能电机控制器
///
/// 读取方法对单个信号独立失败，调用方决定是否保留旧值。
pub trait MotorController {
    /// 写入配置（可能失败，调用方负责重试）
    fn configure(&mut self, config: &MotorConfig) -> Result<(), MotorError>;

    /// 设置闭环参考值
    fn set_reference(&mut self, value: f64, control: ControlType) -> Result<(), MotorError>;

    /// 开环占空比输出（-1.0 ..= 1.0）
    fn set_duty_cycle(&mut self, duty: f64) -> Result<(), MotorError>;

    /// 设置闭环积分累加器
    fn set_integral_accumulator(&mut self, value: f64) -> Result<(), MotorError>;

    /// 停止输出
    fn stop_motor(&mut self);

    /// 电机温度（°C）
    fn temperature(&self) -> Result<f64, MotorError>;

    /// 总线电压（V）
    fn bus_voltage(&self) -> Result<f64, MotorError>;

    /// 当前输出占空比
    fn applied_output(&self) -> Result<f64, MotorError>;

    /// 输出电流（A）
    fn output_current(&self) -> Result<f64, MotorError>;

    /// 编码器位置（电机转数）
    fn position(&self) -> Result<f64, MotorError>;

    /// 编码器速度（电机 RPM）
    fn velocity(&self) -> Result<f64, MotorError>;
}

impl<T: MotorController + ?Sized> MotorController for Box<T> {
    fn configure(&mut self, config: &MotorConfig) -> Result<(), MotorError> {
        (**self).configure(config)
    }

    fn set_reference(&mut self, value: f64, control: ControlType) -> Result<(), MotorError> {
        (**self).set_reference(value, control)
    }

    fn set_duty_cycle(&mut self, duty: f64) -> Result<(), MotorError> {
        (**self).set_duty_cycle(duty)
    }

    fn set_integral_accumulator(&mut self, value: f64) -> Result<(), MotorError> {
        (**self).set_integral_accumulator(value)
    }

    fn stop_motor(&mut self) {
        (**self).stop_motor()
    }

    fn temperature(&self) -> Result<f64, MotorError> {
        (**self).temperature()
    }

    fn bus_voltage(&self) -> Result<f64, MotorError> {
        (**self).bus_voltage()
    }

    fn applied_output(&self) -> Result<f64, MotorError> {
        (**self).applied_output()
    }

    fn output_current(&self) -> Result<f64, MotorError> {
        (**self).output_current()
    }

    fn position(&self) -> Result<f64, MotorError> {
        (**self).position()
    }

    fn velocity(&self) -> Result<f64, MotorError> {
        (**self).velocity()
    }
}

/// 数字输入（限位开关等）
pub trait DigitalInput {
    /// 当前电平
    fn get(&self) -> Result<bool, MotorError>;
}

impl<T: DigitalInput + ?Sized> DigitalInput for Box<T> {
    fn get(&self) -> Result<bool, MotorError> {
        (**self).get()
    }
}
