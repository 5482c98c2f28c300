//! 电机控制器错误类型定义

use std::fmt;
use thiserror::Error;

/// 可单独读取的传感器信号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Signal {
    /// 电机温度
    Temperature,
    /// 总线电压
    BusVoltage,
    /// 输出占空比
    AppliedOutput,
    /// 输出电流
    OutputCurrent,
    /// 编码器位置
    Position,
    /// 编码器速度
    Velocity,
    /// 数字输入（限位开关）
    DigitalInput,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::Temperature => "temperature",
            Signal::BusVoltage => "bus voltage",
            Signal::AppliedOutput => "applied output",
            Signal::OutputCurrent => "output current",
            Signal::Position => "position",
            Signal::Velocity => "velocity",
            Signal::DigitalInput => "digital input",
        };
        f.write_str(name)
    }
}

/// 电机控制器错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotorError {
    /// 控制器未在时限内应答
    #[error("Motor controller timeout")]
    Timeout,

    /// CAN 总线故障
    #[error("CAN fault: {0}")]
    CanFault(String),

    /// 信号帧未更新
    #[error("Stale {0} signal")]
    Stale(Signal),

    /// 控制器拒绝了配置或命令
    #[error("Rejected by controller: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_error_display() {
        assert_eq!(MotorError::Stale(Signal::Velocity).to_string(), "Stale velocity signal");
        assert!(MotorError::CanFault("bus off".into()).to_string().contains("bus off"));
    }
}
