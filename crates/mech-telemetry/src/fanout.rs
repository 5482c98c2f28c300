//! 多路输出

use crate::sink::TelemetrySink;
use crate::value::{InputsRef, TelemetryValue};

/// 把每个事件转发给所有下游输出
#[derive(Default)]
pub struct FanoutSink<'a> {
    sinks: Vec<&'a mut dyn TelemetrySink>,
}

impl<'a> FanoutSink<'a> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// 追加下游
    pub fn with(mut self, sink: &'a mut dyn TelemetrySink) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl TelemetrySink for FanoutSink<'_> {
    fn record(&mut self, key: &str, value: TelemetryValue) {
        for sink in &mut self.sinks {
            sink.record(key, value.clone());
        }
    }

    // 下游可能有自己的快照处理方式（如按类型录制），不能先展开再转发
    fn process_inputs(&mut self, inputs: InputsRef<'_>) {
        for sink in &mut self.sinks {
            sink.process_inputs(inputs);
        }
    }

    fn end_cycle(&mut self) {
        for sink in &mut self.sinks {
            sink.end_cycle();
        }
    }
}
