//! 整车配置
//!
//! 配置文件格式（TOML，所有字段可省略，省略时使用默认值）：
//!
//! ```toml
//! [hardware_ids]
//! flywheel = 31
//!
//! [intake]
//! zero_offset_deg = 12.5
//! max_angle_deg = 95.0
//!
//! [shooter]
//! lookup_points = [[1.0, 1500.0], [2.0, 2100.0], [3.0, 3000.0]]
//!
//! [loop]
//! frequency_hz = 50.0
//!
//! [tunables]
//! "Shooter/FLYWHEEL_PID_TOLERANCE" = 0.03
//! ```

use crate::climber::ClimberConstants;
use crate::error::ConfigError;
use crate::feeder::FeederConstants;
use crate::intake::{IntakeConfig, IntakeConstants};
use crate::shooter::{ShooterConfig, ShooterConstants};
use crate::tunable::TunableStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// CAN ID 与 DIO 端口分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareIds {
    /// 进气臂主俯仰电机
    pub intake_pivot_leader: u8,
    /// 进气臂从俯仰电机
    pub intake_pivot_follower: u8,
    /// 进气滚轮电机
    pub intake_roller: u8,
    /// 飞轮电机
    pub flywheel: u8,
    /// 送料电机
    pub feeder: u8,
    /// 爬升电机
    pub climber: u8,
    /// 进气臂上限位开关 DIO 端口
    pub intake_upper_limit_switch: u8,
}

impl Default for HardwareIds {
    fn default() -> Self {
        Self {
            intake_pivot_leader: 21,
            intake_pivot_follower: 22,
            intake_roller: 20,
            flywheel: 31,
            feeder: 33,
            climber: 42,
            intake_upper_limit_switch: 0,
        }
    }
}

impl HardwareIds {
    fn validate(&self) -> Result<(), ConfigError> {
        let can = [
            ("intake_pivot_leader", self.intake_pivot_leader),
            ("intake_pivot_follower", self.intake_pivot_follower),
            ("intake_roller", self.intake_roller),
            ("flywheel", self.flywheel),
            ("feeder", self.feeder),
            ("climber", self.climber),
        ];
        for (i, (name, id)) in can.iter().enumerate() {
            if let Some((other, _)) = can[i + 1..].iter().find(|(_, other)| other == id) {
                return Err(ConfigError::invalid(
                    format!("hardware_ids.{name}"),
                    format!("CAN id {id} is also assigned to {other}"),
                ));
            }
        }
        Ok(())
    }
}

/// 控制循环设置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopSettings {
    /// 循环频率（Hz）
    pub frequency_hz: f64,
    /// dt 钳位倍数（实际 dt 最大为 `nominal_dt * dt_clamp_multiplier`）
    pub dt_clamp_multiplier: f64,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            frequency_hz: 50.0,
            dt_clamp_multiplier: 2.0,
        }
    }
}

/// 配置文件的原始形态
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RobotFile {
    /// 硬件 ID
    pub hardware_ids: HardwareIds,
    /// 进气臂常量
    pub intake: IntakeConstants,
    /// 射手常量
    pub shooter: ShooterConstants,
    /// 送料器常量
    pub feeder: FeederConstants,
    /// 爬升机构常量
    pub climber: ClimberConstants,
    /// 循环设置
    #[serde(rename = "loop")]
    pub loop_settings: LoopSettings,
    /// 可调参数初始值覆盖（key 为层级名称）
    pub tunables: BTreeMap<String, f64>,
}

/// 整车配置
///
/// 持有共享的 [`TunableStore`]，所有子系统的可调参数都注册在这里。
#[derive(Debug, Clone)]
pub struct RobotConfig {
    /// 硬件 ID
    pub hardware_ids: HardwareIds,
    /// 进气臂
    pub intake: IntakeConfig,
    /// 射手
    pub shooter: ShooterConfig,
    /// 送料器
    pub feeder: FeederConstants,
    /// 爬升机构
    pub climber: ClimberConstants,
    /// 循环设置
    pub loop_settings: LoopSettings,
    store: Arc<TunableStore>,
}

impl Default for RobotConfig {
    fn default() -> Self {
        // 默认常量总是合法的
        Self::build(RobotFile::default())
    }
}

impl RobotConfig {
    /// 从 TOML 文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "robot config loaded");
        Ok(config)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: RobotFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    /// 校验并构建
    pub fn from_file(mut file: RobotFile) -> Result<Self, ConfigError> {
        file.hardware_ids.validate()?;
        file.intake.validate()?;
        file.shooter.validate()?;
        validate_loop(&file.loop_settings)?;

        let overrides = std::mem::take(&mut file.tunables);
        let config = Self::build(file);
        config.store.apply_overrides(&overrides)?;
        Ok(config)
    }

    fn build(file: RobotFile) -> Self {
        let store = Arc::new(TunableStore::new());
        Self {
            hardware_ids: file.hardware_ids,
            intake: IntakeConfig::new(file.intake, &store),
            shooter: ShooterConfig::new(file.shooter, &store),
            feeder: file.feeder,
            climber: file.climber,
            loop_settings: file.loop_settings,
            store,
        }
    }

    /// 共享的可调参数注册表
    pub fn tunables(&self) -> &Arc<TunableStore> {
        &self.store
    }

    /// 所有硬件常量，`"Constants/<Subsystem>/<NAME>"` 形式
    ///
    /// 供启动时一次性写入遥测。
    pub fn publish_constants(&self) -> Vec<(String, f64)> {
        let mut out = Vec::new();
        self.intake.constants.publish(&mut out);
        self.shooter.constants.publish(&mut out);
        self.feeder.publish(&mut out);
        self.climber.publish(&mut out);
        out.push(("Constants/Loop/FREQUENCY_HZ".into(), self.loop_settings.frequency_hz));
        out
    }
}

fn validate_loop(settings: &LoopSettings) -> Result<(), ConfigError> {
    if !(settings.frequency_hz.is_finite() && settings.frequency_hz > 0.0) {
        return Err(ConfigError::invalid("loop.frequency_hz", "must be a positive number"));
    }
    if settings.dt_clamp_multiplier < 1.0 {
        return Err(ConfigError::invalid("loop.dt_clamp_multiplier", "must be >= 1.0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mech_units::Deg;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = RobotConfig::from_toml_str("").unwrap();
        assert_eq!(config.hardware_ids, HardwareIds::default());
        assert_eq!(config.loop_settings.frequency_hz, 50.0);
        assert_eq!(config.shooter.tunables.tolerance.get(), 0.05);
    }

    #[test]
    fn test_partial_sections() {
        let config = RobotConfig::from_toml_str(
            r#"
            [intake]
            zero_offset_deg = 12.5

            [shooter]
            lookup_points = [[1.0, 1500.0], [2.0, 2100.0], [3.0, 3000.0]]

            [tunables]
            "Intake/Position/Pickup" = 55.0
            "#,
        )
        .unwrap();

        assert_eq!(config.intake.constants.zero_offset_deg, 12.5);
        assert_eq!(config.intake.constants.max_angle_deg, 90.0);
        assert_eq!(config.shooter.tunables.lookup.len(), 3);
        assert_eq!(config.intake.tunables.pickup_angle(), Deg(55.0));
    }

    #[test]
    fn test_unknown_tunable_rejected() {
        let err = RobotConfig::from_toml_str("[tunables]\n\"Nope/Nothing\" = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = RobotConfig::from_toml_str("[drivetrain]\nwidth = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_duplicate_can_id() {
        let err = RobotConfig::from_toml_str("[hardware_ids]\nfeeder = 31\n").unwrap_err();
        assert!(err.to_string().contains("31"));
    }

    #[test]
    fn test_duplicate_lookup_distance_rejected() {
        let err = RobotConfig::from_toml_str(
            "[shooter]\nlookup_points = [[1.0, 1500.0], [1.0, 3000.0]]\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "shooter.lookup_points"
        ));
    }

    #[test]
    fn test_bad_loop_frequency() {
        assert!(RobotConfig::from_toml_str("[loop]\nfrequency_hz = 0.0\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[loop]\nfrequency_hz = 100.0").unwrap();

        let config = RobotConfig::load(file.path()).unwrap();
        assert_eq!(config.loop_settings.frequency_hz, 100.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RobotConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_publish_constants() {
        let constants = RobotConfig::default().publish_constants();
        assert!(constants.iter().all(|(k, _)| k.starts_with("Constants/")));
        assert!(
            constants
                .iter()
                .any(|(k, v)| k == "Constants/Intake/MAX_INTAKE_ANGLE" && *v == 90.0)
        );
    }
}
