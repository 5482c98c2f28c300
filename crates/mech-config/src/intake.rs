//! 进气臂（Intake）常量与可调参数
//!
//! 角度约定：0° 定义为进气臂完全收起（STOW），角度越大越靠近地面。

use crate::error::ConfigError;
use crate::tunable::{TunableNumber, TunableStore};
use mech_units::{Amps, Deg, DutyCycle, Rad};
use serde::{Deserialize, Serialize};

/// 进气臂硬件常量
///
/// 构造后端时一次性读取，运行期不变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConstants {
    /// 机械零点偏移（度）：绝对编码器读数为零时机构所在的机构坐标角度的相反数
    pub zero_offset_deg: f64,
    /// 软限位下限（度，机构坐标）
    pub min_angle_deg: f64,
    /// 软限位上限（度，机构坐标）
    pub max_angle_deg: f64,
    /// 俯仰电机 smart 电流限制（A）
    pub pivot_smart_current_limit: u32,
    /// 俯仰电机二级电流限制（A）
    pub pivot_secondary_current_limit: f64,
    /// 滚轮电机 smart 电流限制（A）
    pub roller_smart_current_limit: u32,
    /// 滚轮电机二级电流限制（A）
    pub roller_secondary_current_limit: f64,
    /// 主俯仰电机反转
    pub leader_inverted: bool,
    /// 从俯仰电机是否与主电机反向
    pub follower_opposed: bool,
    /// 滚轮电机反转
    pub roller_inverted: bool,
    /// 电机到末端的减速比（俯仰）
    pub pivot_gear_ratio: f64,
    /// 电机到末端的减速比（滚轮）
    pub roller_gear_ratio: f64,
}

impl Default for IntakeConstants {
    fn default() -> Self {
        Self {
            zero_offset_deg: 0.0,
            min_angle_deg: 0.0,
            max_angle_deg: 90.0,
            pivot_smart_current_limit: 40,
            pivot_secondary_current_limit: 55.0,
            roller_smart_current_limit: 50,
            roller_secondary_current_limit: 60.0,
            leader_inverted: false,
            follower_opposed: true,
            roller_inverted: false,
            pivot_gear_ratio: 1.0,
            roller_gear_ratio: 1.0,
        }
    }
}

impl IntakeConstants {
    /// 机械零点偏移
    pub fn zero_offset(&self) -> Rad {
        Deg(self.zero_offset_deg).to_rad()
    }

    /// 软限位下限
    pub fn min_angle(&self) -> Rad {
        Deg(self.min_angle_deg).to_rad()
    }

    /// 软限位上限
    pub fn max_angle(&self) -> Rad {
        Deg(self.max_angle_deg).to_rad()
    }

    /// 俯仰二级电流限制
    pub fn pivot_secondary_limit(&self) -> Amps {
        Amps(self.pivot_secondary_current_limit)
    }

    /// 滚轮二级电流限制
    pub fn roller_secondary_limit(&self) -> Amps {
        Amps(self.roller_secondary_current_limit)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.min_angle_deg >= self.max_angle_deg {
            return Err(ConfigError::invalid(
                "intake.min_angle_deg",
                format!(
                    "min ({}) must be below max ({})",
                    self.min_angle_deg, self.max_angle_deg
                ),
            ));
        }
        if self.pivot_gear_ratio <= 0.0 || self.roller_gear_ratio <= 0.0 {
            return Err(ConfigError::invalid("intake.gear_ratio", "must be > 0"));
        }
        Ok(())
    }

    pub(crate) fn publish(&self, out: &mut Vec<(String, f64)>) {
        out.push(("Constants/Intake/MIN_INTAKE_ANGLE".into(), self.min_angle_deg));
        out.push(("Constants/Intake/MAX_INTAKE_ANGLE".into(), self.max_angle_deg));
        out.push((
            "Constants/Intake/INTAKE_PIVOT_SMART_CURRENT_LIMIT".into(),
            f64::from(self.pivot_smart_current_limit),
        ));
        out.push((
            "Constants/Intake/INTAKE_PIVOT_SECONDARY_CURRENT_LIMIT".into(),
            self.pivot_secondary_current_limit,
        ));
        out.push((
            "Constants/Intake/INTAKE_ROLLER_SMART_CURRENT_LIMIT".into(),
            f64::from(self.roller_smart_current_limit),
        ));
        out.push((
            "Constants/Intake/INTAKE_ROLLER_SECONDARY_CURRENT_LIMIT".into(),
            self.roller_secondary_current_limit,
        ));
    }
}

/// 进气臂可调参数
#[derive(Debug, Clone)]
pub struct IntakeTunables {
    /// 俯仰 PID 比例增益
    pub pivot_kp: TunableNumber,
    /// 俯仰 PID 积分增益
    pub pivot_ki: TunableNumber,
    /// 俯仰 PID 微分增益
    pub pivot_kd: TunableNumber,
    /// PICKUP 位置角度（度）
    pub pickup_angle_deg: TunableNumber,
    /// STOW 位置角度（度）
    pub stow_angle_deg: TunableNumber,
    /// 滚轮吸入占空比
    pub roller_acquire_speed: TunableNumber,
    /// 滚轮电流截止（A）
    pub roller_current_cutoff: TunableNumber,
}

impl IntakeTunables {
    /// 注册到 store（已存在的 key 保留当前值）
    pub fn register(store: &TunableStore) -> Self {
        Self {
            pivot_kp: store.number("Intake/Pivot/PID/kP", 0.0038),
            pivot_ki: store.number("Intake/Pivot/PID/kI", 0.0),
            pivot_kd: store.number("Intake/Pivot/PID/kD", 0.000085),
            pickup_angle_deg: store.number("Intake/Position/Pickup", 50.0),
            stow_angle_deg: store.number("Intake/Position/Stow", 0.0),
            roller_acquire_speed: store.number("Intake/Roller/Aquire Speed", 0.8),
            roller_current_cutoff: store.number("Intake/Roller/Current Cutoff", 40.0),
        }
    }

    /// PICKUP 当前角度
    pub fn pickup_angle(&self) -> Deg {
        Deg(self.pickup_angle_deg.get())
    }

    /// STOW 当前角度
    pub fn stow_angle(&self) -> Deg {
        Deg(self.stow_angle_deg.get())
    }

    /// 滚轮吸入占空比
    pub fn acquire_duty(&self) -> DutyCycle {
        DutyCycle::new(self.roller_acquire_speed.get())
    }
}

/// 进气臂配置
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// 硬件常量
    pub constants: IntakeConstants,
    /// 可调参数
    pub tunables: IntakeTunables,
}

impl IntakeConfig {
    /// 使用给定常量并在 store 中注册可调参数
    pub fn new(constants: IntakeConstants, store: &TunableStore) -> Self {
        Self {
            constants,
            tunables: IntakeTunables::register(store),
        }
    }
}
