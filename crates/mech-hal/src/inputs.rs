//! 遥测快照
//!
//! 每个控制周期由 `update_inputs` 整体生成一次，生成后不再修改。
//! 下一周期的新值整体替换旧值，没有逐字段写入。

use mech_units::{Amps, Celsius, RadPerSec, Rad, Volts};
use serde::{Deserialize, Serialize};

/// 单个电机的传感量
///
/// 位置、速度为机构端物理量（已经过编码器换算）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorInputs {
    /// 电机温度
    pub temperature: Celsius,
    /// 施加电压（占空比 × 总线电压）
    pub voltage: Volts,
    /// 输出电流
    pub current: Amps,
    /// 位置
    pub position: Rad,
    /// 速度
    pub velocity: RadPerSec,
}

/// 进气臂快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntakeInputs {
    /// 主俯仰电机
    pub pivot_leader: MotorInputs,
    /// 从俯仰电机
    pub pivot_follower: MotorInputs,
    /// 滚轮电机
    pub roller: MotorInputs,
    /// 上限位开关是否触发
    pub upper_limit_switch: bool,
}

/// 射手快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShooterInputs {
    /// 飞轮电机
    pub flywheel: MotorInputs,
}

/// 送料器快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeederInputs {
    /// 送料电机
    pub motor: MotorInputs,
}

/// 爬升机构快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimberInputs {
    /// 爬升电机
    pub motor: MotorInputs,
}
