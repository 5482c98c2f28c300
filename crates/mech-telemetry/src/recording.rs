//! 录制输出
//!
//! 按类型捕获每个周期的子系统快照，周期结束时写入一帧。
//! 派生量（`record` 写入的值）不进入日志：回放时由控制器重新计算。

use crate::log::{LogFrame, LogMetadata, TelemetryLog};
use crate::sink::TelemetrySink;
use crate::value::{InputsRef, TelemetryValue};
use std::time::Instant;

/// 把快照录制为 [`TelemetryLog`]
#[derive(Debug)]
pub struct RecordingSink {
    log: TelemetryLog,
    pending: LogFrame,
    start: Instant,
    cycle: u64,
}

impl RecordingSink {
    pub fn new(metadata: LogMetadata) -> Self {
        Self {
            log: TelemetryLog::new(metadata),
            pending: LogFrame::default(),
            start: Instant::now(),
            cycle: 0,
        }
    }

    /// 已录制的日志
    pub fn log(&self) -> &TelemetryLog {
        &self.log
    }

    /// 取出日志（未结束的周期丢弃）
    pub fn into_log(self) -> TelemetryLog {
        self.log
    }
}

impl TelemetrySink for RecordingSink {
    fn record(&mut self, _key: &str, _value: TelemetryValue) {}

    fn process_inputs(&mut self, inputs: InputsRef<'_>) {
        match inputs {
            InputsRef::Intake(i) => self.pending.intake = Some(*i),
            InputsRef::Shooter(i) => self.pending.shooter = Some(*i),
            InputsRef::Feeder(i) => self.pending.feeder = Some(*i),
            InputsRef::Climber(i) => self.pending.climber = Some(*i),
        }
    }

    fn end_cycle(&mut self) {
        let mut frame = std::mem::take(&mut self.pending);
        frame.cycle = self.cycle;
        frame.timestamp_us = self.start.elapsed().as_micros() as u64;
        self.log.add_frame(frame);
        self.cycle += 1;
    }
}
