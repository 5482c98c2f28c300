//! run 命令
//!
//! 构造后端、运行控制循环与示例序列，可选录制日志。

use crate::output::print_summary;
use crate::robot::{SimRobot, load_config};
use crate::scenario::{Scenario, ScenarioKind};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use mech_subsystems::{ControlLoop, LoopConfig, SubsystemSet};
use mech_telemetry::{
    FanoutSink, LogMetadata, MemorySink, RecordingSink, TelemetrySink, TracingSink,
};
use mech_units::Meters;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 后端模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// 物理仿真
    Sim,
    /// 实体硬件
    Real,
}

/// run 命令参数
#[derive(Args, Debug)]
pub struct RunCommand {
    /// 后端模式
    #[arg(long, value_enum, default_value_t = Mode::Sim)]
    pub mode: Mode,

    /// 最大周期数
    #[arg(long, default_value_t = 250)]
    pub cycles: u64,

    /// 配置文件（TOML）
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 可调参数覆盖（KEY=VALUE，可重复）
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// 录制日志输出路径
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// 示例序列
    #[arg(long, value_enum, default_value_t = ScenarioKind::Shoot)]
    pub scenario: ScenarioKind,

    /// 射击距离（米）
    #[arg(long, default_value_t = 2.0)]
    pub distance: f64,

    /// 不休眠，尽快运行
    #[arg(long)]
    pub fast: bool,

    /// 打印全部遥测 key
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunCommand {
    pub fn execute(&self, running: Arc<AtomicBool>) -> Result<()> {
        if self.mode == Mode::Real {
            anyhow::bail!(
                "❌ real 模式不可用：此构建不包含实体电机控制器驱动（Real 后端需由集成方提供 MotorController 实现）"
            );
        }
        if !self.distance.is_finite() {
            anyhow::bail!("❌ 距离必须是有限数值: {}", self.distance);
        }

        let config = load_config(self.config.as_deref(), &self.overrides)?;
        let loop_config = LoopConfig {
            max_iterations: Some(self.cycles),
            ..LoopConfig::from(&config.loop_settings)
        };
        let mut control = ControlLoop::new(loop_config).context("控制循环配置无效")?;

        let mut robot = SimRobot::simulated(&config);
        let mut scenario = Scenario::new(self.scenario, Meters(self.distance));

        let notes = format!("scenario={} distance={}", self.scenario, self.distance);
        let metadata = LogMetadata::new("sim", config.loop_settings.frequency_hz).with_notes(notes);
        let mut recording = RecordingSink::new(metadata);
        let mut memory = MemorySink::new();
        let mut tracing_sink = TracingSink::new();

        for (key, value) in config.publish_constants() {
            memory.record_number(&key, value);
        }

        println!("⏳ 运行 {} 序列（sim, 最多 {} 周期）...", self.scenario, self.cycles);
        println!("💡 提示: 按 Ctrl-C 可随时停止");

        {
            let mut sink = FanoutSink::new().with(&mut memory).with(&mut tracing_sink);
            if self.record.is_some() {
                sink = sink.with(&mut recording);
            }

            let mut hook = |robot: &mut SimRobot, tick: &mech_subsystems::Tick| {
                if !running.load(Ordering::SeqCst) {
                    return ControlFlow::Break(());
                }
                scenario.advance(robot, tick)
            };

            if self.fast {
                for _ in 0..self.cycles {
                    let tick = control.tick(&mut robot, &mut sink);
                    if hook(&mut robot, &tick).is_break() {
                        break;
                    }
                }
            } else {
                control.run(&mut robot, &mut sink, hook);
            }

            // 停止命令在下一周期生效
            robot.stop_all();
            control.tick(&mut robot, &mut sink);
        }

        if !running.load(Ordering::SeqCst) {
            println!("⚠️ 被用户中断，已停止所有子系统");
        } else if scenario.is_done() {
            println!("✅ 序列完成");
        } else {
            println!("⚠️ 达到周期上限，序列未完成");
        }
        if control.overruns() > 0 {
            println!("⚠️ 控制周期超时 {} 次", control.overruns());
        }

        if let Some(path) = &self.record {
            let log = recording.into_log();
            log.save(path)
                .with_context(|| format!("保存日志失败: {}", path.display()))?;
            println!("💾 已录制 {} 帧到 {}", log.frame_count(), path.display());
        }

        print_summary("运行结果", &memory, self.verbose);
        Ok(())
    }
}
