//! 输出到 tracing

use crate::sink::TelemetrySink;
use crate::value::TelemetryValue;

/// 每个 key 发出一条 `trace!` 事件（target = `telemetry`）
#[derive(Debug, Default, Clone)]
pub struct TracingSink {
    cycle: u64,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TelemetrySink for TracingSink {
    fn record(&mut self, key: &str, value: TelemetryValue) {
        tracing::trace!(target: "telemetry", cycle = self.cycle, key, %value);
    }

    fn end_cycle(&mut self) {
        self.cycle += 1;
    }
}
