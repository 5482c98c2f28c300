//! # 遥测日志格式
//!
//! 录制文件记录每个控制周期的四个子系统快照，供 Replay 后端回放。

use anyhow::{Context, Result};
use mech_hal::{ClimberInputs, FeederInputs, IntakeInputs, ShooterInputs};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

/// 日志文件魔数
pub const MAGIC: &[u8; 8] = b"MECHLOG\0";

/// 当前格式版本
pub const LOG_VERSION: u8 = 1;

/// 遥测日志 v1
///
/// ```text
/// [MAGIC: 8 bytes]
/// [Version: 1 byte]
/// [Data: bincode serialized TelemetryLog]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryLog {
    /// 格式版本
    pub version: u8,

    /// 元数据
    pub metadata: LogMetadata,

    /// 按周期排列的快照
    pub frames: Vec<LogFrame>,
}

impl TelemetryLog {
    pub fn new(metadata: LogMetadata) -> Self {
        Self {
            version: LOG_VERSION,
            metadata,
            frames: Vec::new(),
        }
    }

    /// 追加一帧
    pub fn add_frame(&mut self, frame: LogFrame) {
        self.frames.push(frame);
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// 首帧到末帧的时间跨度
    pub fn duration(&self) -> Option<Duration> {
        let first = self.frames.first()?.timestamp_us;
        let last = self.frames.last()?.timestamp_us;
        Some(Duration::from_micros(last.saturating_sub(first)))
    }

    /// 进气臂快照序列（缺失的周期跳过）
    pub fn intake_frames(&self) -> Vec<IntakeInputs> {
        self.frames.iter().filter_map(|f| f.intake).collect()
    }

    /// 射手快照序列
    pub fn shooter_frames(&self) -> Vec<ShooterInputs> {
        self.frames.iter().filter_map(|f| f.shooter).collect()
    }

    /// 送料器快照序列
    pub fn feeder_frames(&self) -> Vec<FeederInputs> {
        self.frames.iter().filter_map(|f| f.feeder).collect()
    }

    /// 爬升机构快照序列
    pub fn climber_frames(&self) -> Vec<ClimberInputs> {
        self.frames.iter().filter_map(|f| f.climber).collect()
    }

    /// 保存到文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("创建日志文件失败: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        writer.write_all(MAGIC).context("写入魔数失败")?;
        writer.write_all(&[self.version]).context("写入版本失败")?;

        let data = bincode::serialize(self).context("序列化日志失败")?;
        writer.write_all(&data).context("写入日志数据失败")?;
        writer.flush().context("刷新缓冲区失败")?;

        Ok(())
    }

    /// 从文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("打开日志文件失败: {}", path.display()))?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 8];
        reader.read_exact(&mut magic).context("读取魔数失败")?;
        if &magic != MAGIC {
            anyhow::bail!("无效的日志文件格式（魔数不匹配）");
        }

        let mut version = [0u8; 1];
        reader.read_exact(&mut version).context("读取版本失败")?;
        if version[0] != LOG_VERSION {
            anyhow::bail!("不支持的日志文件版本: {}", version[0]);
        }

        let mut data = Vec::new();
        reader.read_to_end(&mut data).context("读取日志数据失败")?;

        let log: TelemetryLog = bincode::deserialize(&data).context("反序列化日志失败")?;
        Ok(log)
    }
}

/// 日志元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMetadata {
    /// 开始时间（Unix 时间戳，秒）
    pub start_time: u64,

    /// 后端模式（`sim` / `real` / `replay`）
    pub mode: String,

    /// 控制循环频率
    pub loop_frequency_hz: f64,

    /// 平台信息
    pub platform: String,

    /// 备注
    pub notes: String,
}

impl LogMetadata {
    pub fn new(mode: impl Into<String>, loop_frequency_hz: f64) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        Self {
            start_time: SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs(),
            mode: mode.into(),
            loop_frequency_hz,
            platform: std::env::consts::OS.to_string(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// 一个控制周期的快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LogFrame {
    /// 周期序号
    pub cycle: u64,

    /// 相对录制开始的时间（微秒）
    pub timestamp_us: u64,

    pub intake: Option<IntakeInputs>,
    pub shooter: Option<ShooterInputs>,
    pub feeder: Option<FeederInputs>,
    pub climber: Option<ClimberInputs>,
}

impl LogFrame {
    pub fn new(cycle: u64, timestamp_us: u64) -> Self {
        Self {
            cycle,
            timestamp_us,
            ..Self::default()
        }
    }

    /// 本周期没有任何快照
    pub fn is_empty(&self) -> bool {
        self.intake.is_none()
            && self.shooter.is_none()
            && self.feeder.is_none()
            && self.climber.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let mut log = TelemetryLog::new(LogMetadata::new("sim", 50.0));
        assert!(log.duration().is_none());

        log.add_frame(LogFrame::new(0, 0));
        log.add_frame(LogFrame::new(1, 20_000));
        assert_eq!(log.duration(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_frames_skip_missing() {
        let mut log = TelemetryLog::new(LogMetadata::new("sim", 50.0));
        let mut frame = LogFrame::new(0, 0);
        frame.feeder = Some(FeederInputs::default());
        log.add_frame(frame);
        log.add_frame(LogFrame::new(1, 20_000));

        assert_eq!(log.feeder_frames().len(), 1);
        assert!(log.intake_frames().is_empty());
        assert!(log.frames[1].is_empty());
    }
}
