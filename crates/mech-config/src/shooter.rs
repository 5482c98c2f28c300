//! 射手（Shooter）常量与可调参数

use crate::error::ConfigError;
use crate::tunable::{TunableNumber, TunableStore};
use mech_units::{Meters, Rpm};
use serde::{Deserialize, Serialize};

/// 射手硬件常量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConstants {
    /// 电机到飞轮的减速比
    pub flywheel_gear_ratio: f64,
    /// 飞轮 smart 电流限制（A）
    pub flywheel_smart_current_limit: u32,
    /// 飞轮二级电流限制（A）
    pub flywheel_secondary_current_limit: f64,
    /// 飞轮电机反转
    pub flywheel_inverted: bool,
    /// 默认查表点 `[距离(m), 转速(RPM)]`，注册为可调参数的初始值
    pub lookup_points: Vec<[f64; 2]>,
}

impl Default for ShooterConstants {
    fn default() -> Self {
        Self {
            flywheel_gear_ratio: 2.0,
            flywheel_smart_current_limit: 100,
            flywheel_secondary_current_limit: 100.0,
            flywheel_inverted: false,
            lookup_points: vec![[1.0, 1500.0], [3.0, 3000.0]],
        }
    }
}

impl ShooterConstants {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.flywheel_gear_ratio <= 0.0 {
            return Err(ConfigError::invalid("shooter.flywheel_gear_ratio", "must be > 0"));
        }
        if self.lookup_points.is_empty() {
            return Err(ConfigError::invalid(
                "shooter.lookup_points",
                "at least one point is required",
            ));
        }
        if let Some([distance, speed]) = self
            .lookup_points
            .iter()
            .find(|[distance, speed]| !distance.is_finite() || !speed.is_finite())
        {
            return Err(ConfigError::invalid(
                "shooter.lookup_points",
                format!("non-finite point [{distance}, {speed}]"),
            ));
        }

        let mut distances: Vec<f64> = self.lookup_points.iter().map(|[d, _]| *d).collect();
        distances.sort_by(f64::total_cmp);
        if let Some(pair) = distances.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ConfigError::invalid(
                "shooter.lookup_points",
                format!("duplicate distance {} m", pair[0]),
            ));
        }
        Ok(())
    }

    pub(crate) fn publish(&self, out: &mut Vec<(String, f64)>) {
        out.push(("Constants/Shooter/FLYWHEEL_GEAR_RATIO".into(), self.flywheel_gear_ratio));
        out.push((
            "Constants/Shooter/SHOOTER_FLYWHEEL_SMART_CURRENT_LIMIT".into(),
            f64::from(self.flywheel_smart_current_limit),
        ));
        out.push((
            "Constants/Shooter/SHOOTER_FLYWHEEL_SECONDARY_CURRENT_LIMIT".into(),
            self.flywheel_secondary_current_limit,
        ));
        out.push((
            "Constants/Shooter/SHOOTER_FLYWHEEL_INVERTED".into(),
            if self.flywheel_inverted { 1.0 } else { 0.0 },
        ));
    }
}

/// 一个可调查表点（距离 -> 转速）
#[derive(Debug, Clone)]
pub struct LookupPoint {
    /// 距离（m）
    pub distance_m: TunableNumber,
    /// 转速（RPM）
    pub speed_rpm: TunableNumber,
}

impl LookupPoint {
    /// 当前值
    pub fn current(&self) -> (Meters, Rpm) {
        (Meters(self.distance_m.get()), Rpm(self.speed_rpm.get()))
    }
}

/// 射手可调参数
#[derive(Debug, Clone)]
pub struct ShooterTunables {
    /// 飞轮 PID 比例增益
    pub flywheel_kp: TunableNumber,
    /// 飞轮 PID 积分增益
    pub flywheel_ki: TunableNumber,
    /// 飞轮 PID 微分增益
    pub flywheel_kd: TunableNumber,
    /// 飞轮前馈增益
    pub flywheel_ff: TunableNumber,
    /// 默认飞轮转速（RPM）
    pub flywheel_speed_rpm: TunableNumber,
    /// 到速容差（目标转速的比例，0.05 = 5%）
    pub tolerance: TunableNumber,
    /// 查表输出下限（RPM）
    pub min_speed_rpm: TunableNumber,
    /// 查表输出上限（RPM）
    pub max_speed_rpm: TunableNumber,
    /// 查表点
    pub lookup: Vec<LookupPoint>,
}

impl ShooterTunables {
    /// 注册到 store
    ///
    /// 查表点 key 从 1 开始编号：`Shooter/Lookup/Distance1_meters`、`Shooter/Lookup/Speed1_RPM`。
    pub fn register(store: &TunableStore, constants: &ShooterConstants) -> Self {
        let lookup = constants
            .lookup_points
            .iter()
            .enumerate()
            .map(|(i, [distance, speed])| LookupPoint {
                distance_m: store.number(&format!("Shooter/Lookup/Distance{}_meters", i + 1), *distance),
                speed_rpm: store.number(&format!("Shooter/Lookup/Speed{}_RPM", i + 1), *speed),
            })
            .collect();

        Self {
            flywheel_kp: store.number("Shooter/FLYWHEEL_PID/kP", 0.0),
            flywheel_ki: store.number("Shooter/FLYWHEEL_PID/kI", 0.0),
            flywheel_kd: store.number("Shooter/FLYWHEEL_PID/kD", 0.0),
            // 电机端原始 RPM 单位：1 / kFF 需覆盖 MAX_FLYWHEEL_SPEED_RPM × 减速比
            flywheel_ff: store.number("Shooter/FLYWHEEL_PID/kFF", 0.00009),
            flywheel_speed_rpm: store.number("Shooter/FLYWHEEL_SPEED", 1500.0),
            tolerance: store.number("Shooter/FLYWHEEL_PID_TOLERANCE", 0.05),
            min_speed_rpm: store.number("Shooter/MIN_FLYWHEEL_SPEED_RPM", 100.0),
            max_speed_rpm: store.number("Shooter/MAX_FLYWHEEL_SPEED_RPM", 5000.0),
            lookup,
        }
    }

    /// 查表点当前值
    pub fn lookup_points(&self) -> Vec<(Meters, Rpm)> {
        self.lookup.iter().map(LookupPoint::current).collect()
    }
}

/// 射手配置
#[derive(Debug, Clone)]
pub struct ShooterConfig {
    /// 硬件常量
    pub constants: ShooterConstants,
    /// 可调参数
    pub tunables: ShooterTunables,
}

impl ShooterConfig {
    /// 使用给定常量并在 store 中注册可调参数
    pub fn new(constants: ShooterConstants, store: &TunableStore) -> Self {
        let tunables = ShooterTunables::register(store, &constants);
        Self { constants, tunables }
    }
}
