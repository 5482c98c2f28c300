//! 内存输出
//!
//! 保存每个 key 的最新值；可选保存每个周期的完整记录。用于测试与 CLI 汇总。

use crate::sink::TelemetrySink;
use crate::value::TelemetryValue;
use std::collections::BTreeMap;

/// 内存遥测输出
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    latest: BTreeMap<String, TelemetryValue>,
    current: BTreeMap<String, TelemetryValue>,
    history: Vec<BTreeMap<String, TelemetryValue>>,
    keep_history: bool,
    cycles: u64,
}

impl MemorySink {
    /// 只保留最新值
    pub fn new() -> Self {
        Self::default()
    }

    /// 同时保留每个周期的记录
    pub fn with_history() -> Self {
        Self {
            keep_history: true,
            ..Self::default()
        }
    }

    /// 某 key 的最新值
    pub fn get(&self, key: &str) -> Option<&TelemetryValue> {
        self.latest.get(key)
    }

    /// 某 key 的最新数值
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(TelemetryValue::as_number)
    }

    /// 某 key 的最新布尔值
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(TelemetryValue::as_bool)
    }

    /// 所有最新值（按 key 排序）
    pub fn latest(&self) -> &BTreeMap<String, TelemetryValue> {
        &self.latest
    }

    /// 已结束的周期数
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// 每个周期的记录（需 `with_history`）
    pub fn history(&self) -> &[BTreeMap<String, TelemetryValue>] {
        &self.history
    }

    /// 某 key 在各周期的数值序列（需 `with_history`）
    pub fn series(&self, key: &str) -> Vec<f64> {
        self.history
            .iter()
            .filter_map(|cycle| cycle.get(key).and_then(TelemetryValue::as_number))
            .collect()
    }
}

impl TelemetrySink for MemorySink {
    fn record(&mut self, key: &str, value: TelemetryValue) {
        if self.keep_history {
            self.current.insert(key.to_string(), value.clone());
        }
        self.latest.insert(key.to_string(), value);
    }

    fn end_cycle(&mut self) {
        self.cycles += 1;
        if self.keep_history {
            self.history.push(std::mem::take(&mut self.current));
        }
    }
}
