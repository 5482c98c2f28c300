//! inspect 命令

use anyhow::{Context, Result};
use clap::Args;
use mech_telemetry::TelemetryLog;
use std::path::PathBuf;

/// 查看日志元数据
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// 日志文件路径
    pub log: PathBuf,
}

impl InspectCommand {
    pub fn execute(&self) -> Result<()> {
        let log = TelemetryLog::load(&self.log)
            .with_context(|| format!("加载日志失败: {}", self.log.display()))?;
        print!("{}", describe(&log));
        Ok(())
    }
}

/// 日志概要
pub fn describe(log: &TelemetryLog) -> String {
    let meta = &log.metadata;
    let duration = log
        .duration()
        .map_or_else(|| "-".to_string(), |d| format!("{:.3}s", d.as_secs_f64()));

    let mut out = String::new();
    out.push_str(&format!("版本:       {}\n", log.version));
    out.push_str(&format!("开始时间:   {}\n", meta.start_time));
    out.push_str(&format!("模式:       {}\n", meta.mode));
    out.push_str(&format!("循环频率:   {} Hz\n", meta.loop_frequency_hz));
    out.push_str(&format!("平台:       {}\n", meta.platform));
    out.push_str(&format!("备注:       {}\n", meta.notes));
    out.push_str(&format!("帧数:       {}\n", log.frame_count()));
    out.push_str(&format!("时长:       {duration}\n"));
    out.push_str(&format!(
        "子系统帧:   intake {} / shooter {} / feeder {} / climber {}\n",
        log.intake_frames().len(),
        log.shooter_frames().len(),
        log.feeder_frames().len(),
        log.climber_frames().len(),
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mech_telemetry::{LogFrame, LogMetadata};

    #[test]
    fn test_describe() {
        let mut log = TelemetryLog::new(LogMetadata::new("sim", 50.0).with_notes("scenario=idle"));
        log.add_frame(LogFrame::new(0, 0));
        log.add_frame(LogFrame::new(1, 20_000));

        let text = describe(&log);
        assert!(text.contains("帧数:       2"));
        assert!(text.contains("0.020s"));
        assert!(text.contains("scenario=idle"));
    }
}
