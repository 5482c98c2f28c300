//! replay 命令
//!
//! 用回放后端重新运行控制器：快照来自日志，命令不驱动任何硬件。
//! 尽快运行（不休眠），直到日志读尽。

use crate::output::print_summary;
use crate::robot::{ReplayRobot, load_config};
use crate::scenario::{Scenario, ScenarioKind, distance_from_notes};
use anyhow::{Context, Result};
use clap::Args;
use mech_subsystems::{ControlLoop, LoopConfig, SubsystemSet};
use mech_telemetry::{MemorySink, TelemetryLog};
use mech_units::Meters;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 回放命令参数
#[derive(Args, Debug)]
pub struct ReplayCommand {
    /// 日志文件路径
    pub log: PathBuf,

    /// 配置文件（TOML），应与录制时一致
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 可调参数覆盖（KEY=VALUE，可重复）
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// 示例序列（默认取日志备注中的序列）
    #[arg(long, value_enum)]
    pub scenario: Option<ScenarioKind>,

    /// 打印全部遥测 key
    #[arg(short, long)]
    pub verbose: bool,
}

impl ReplayCommand {
    pub fn execute(&self, running: Arc<AtomicBool>) -> Result<()> {
        let log = TelemetryLog::load(&self.log)
            .with_context(|| format!("加载日志失败: {}", self.log.display()))?;
        let config = load_config(self.config.as_deref(), &self.overrides)?;

        let notes = &log.metadata.notes;
        let kind = self
            .scenario
            .or_else(|| ScenarioKind::from_notes(notes))
            .unwrap_or(ScenarioKind::Idle);
        let distance = Meters(distance_from_notes(notes).unwrap_or(0.0));
        let mut scenario = Scenario::new(kind, distance);

        let mut robot = ReplayRobot::replay(&log, &config)?;
        let mut control = ControlLoop::new(LoopConfig {
            frequency_hz: log.metadata.loop_frequency_hz,
            ..LoopConfig::default()
        })
        .context("日志中的循环频率无效")?;
        let mut sink = MemorySink::new();

        println!("📁 回放 {}（{} 帧，序列 {kind}）", self.log.display(), log.frame_count());

        let mut scenario_active = true;
        while !robot.exhausted() && running.load(Ordering::SeqCst) {
            let tick = control.tick(&mut robot, &mut sink);
            // 序列结束后继续回放剩余帧
            if scenario_active && scenario.advance(&mut robot, &tick).is_break() {
                scenario_active = false;
            }
        }
        robot.stop_all();

        if !running.load(Ordering::SeqCst) {
            println!("⚠️ 回放被用户中断");
        } else {
            println!("✅ 回放完成");
        }
        print_summary("回放结果", &sink, self.verbose);
        Ok(())
    }
}
