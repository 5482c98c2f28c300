//! 整车装配
//!
//! 模式选择器：在进程启动时为每个机构族构造一种后端并注入控制器。

use anyhow::{Context, Result};
use mech_config::RobotConfig;
use mech_hal::sim::{SimClimberIo, SimFeederIo, SimIntakeIo, SimShooterIo};
use mech_hal::{
    ClimberInputs, ClimberIo, FeederInputs, FeederIo, IntakeInputs, IntakeIo, ReplayIo,
    ShooterInputs, ShooterIo,
};
use mech_subsystems::{Climber, Feeder, Intake, Shooter, Subsystem, SubsystemSet};
use mech_telemetry::TelemetryLog;

/// 四个子系统控制器（注册顺序：Intake, Shooter, Feeder, Climber）
pub struct Robot<I: IntakeIo, S: ShooterIo, F: FeederIo, C: ClimberIo> {
    pub intake: Intake<I>,
    pub shooter: Shooter<S>,
    pub feeder: Feeder<F>,
    pub climber: Climber<C>,
}

/// 仿真后端
pub type SimRobot = Robot<SimIntakeIo, SimShooterIo, SimFeederIo, SimClimberIo>;

/// 回放后端
pub type ReplayRobot = Robot<
    ReplayIo<IntakeInputs>,
    ReplayIo<ShooterInputs>,
    ReplayIo<FeederInputs>,
    ReplayIo<ClimberInputs>,
>;

impl SimRobot {
    pub fn simulated(config: &RobotConfig) -> Self {
        Self {
            intake: Intake::new(SimIntakeIo::new(&config.intake), &config.intake),
            shooter: Shooter::new(SimShooterIo::new(&config.shooter), &config.shooter),
            feeder: Feeder::new(SimFeederIo::new(&config.feeder)),
            climber: Climber::new(SimClimberIo::new(&config.climber)),
        }
    }
}

impl ReplayRobot {
    /// 由录制日志构造；日志中缺少的子系统以默认快照回放
    pub fn replay(log: &TelemetryLog, config: &RobotConfig) -> Result<Self> {
        if log.frames.is_empty() {
            anyhow::bail!("日志中没有任何帧");
        }
        let robot = Self {
            intake: Intake::new(ReplayIo::new(log.intake_frames()), &config.intake),
            shooter: Shooter::new(ReplayIo::new(log.shooter_frames()), &config.shooter),
            feeder: Feeder::new(ReplayIo::new(log.feeder_frames())),
            climber: Climber::new(ReplayIo::new(log.climber_frames())),
        };
        Ok(robot)
    }

    /// 所有回放后端都已读尽
    pub fn exhausted(&self) -> bool {
        self.intake.io().is_exhausted()
            && self.shooter.io().is_exhausted()
            && self.feeder.io().is_exhausted()
            && self.climber.io().is_exhausted()
    }
}

impl<I: IntakeIo, S: ShooterIo, F: FeederIo, C: ClimberIo> SubsystemSet for Robot<I, S, F, C> {
    fn for_each_subsystem(&mut self, visit: &mut dyn FnMut(&mut dyn Subsystem)) {
        visit(&mut self.intake);
        visit(&mut self.shooter);
        visit(&mut self.feeder);
        visit(&mut self.climber);
    }
}

/// 加载配置文件（未指定时使用默认常量），再应用命令行覆盖
pub fn load_config(path: Option<&std::path::Path>, overrides: &[String]) -> Result<RobotConfig> {
    let config = match path {
        Some(path) => RobotConfig::load(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => RobotConfig::default(),
    };

    for entry in overrides {
        let (key, value) = entry
            .split_once('=')
            .with_context(|| format!("覆盖项格式应为 KEY=VALUE: {entry}"))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("覆盖值不是数字: {entry}"))?;
        config
            .tunables()
            .set(key.trim(), value)
            .with_context(|| format!("无法覆盖 {key}"))?;
    }
    Ok(config)
}
