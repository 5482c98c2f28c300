//! 遥测输出接口
//!
//! 从控制核心的角度看是只写的：控制器每周期写入快照与派生量，
//! 不读取任何东西。

use crate::value::{InputsRef, TelemetryValue};
use serde_json::Value;

/// 遥测输出
pub trait TelemetrySink {
    /// 记录一个层级 key 的值（`"<Subsystem>/<field>"`）
    fn record(&mut self, key: &str, value: TelemetryValue);

    /// 记录整个快照
    ///
    /// 默认实现把快照展开为 `"<Subsystem>/<field>/<sub-field>"` 形式逐项记录。
    fn process_inputs(&mut self, inputs: InputsRef<'_>) {
        match inputs.to_json() {
            Ok(tree) => {
                for (key, value) in flatten(inputs.subsystem(), &tree) {
                    self.record(&key, value);
                }
            },
            Err(e) => tracing::warn!(subsystem = inputs.subsystem(), error = %e, "snapshot not serializable"),
        }
    }

    /// 一个控制周期结束
    fn end_cycle(&mut self) {}

    /// 记录数值
    fn record_number(&mut self, key: &str, value: f64) {
        self.record(key, TelemetryValue::Number(value));
    }

    /// 记录布尔值
    fn record_bool(&mut self, key: &str, value: bool) {
        self.record(key, TelemetryValue::Bool(value));
    }
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for &mut T {
    fn record(&mut self, key: &str, value: TelemetryValue) {
        (**self).record(key, value)
    }

    fn process_inputs(&mut self, inputs: InputsRef<'_>) {
        (**self).process_inputs(inputs)
    }

    fn end_cycle(&mut self) {
        (**self).end_cycle()
    }
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for Box<T> {
    fn record(&mut self, key: &str, value: TelemetryValue) {
        (**self).record(key, value)
    }

    fn process_inputs(&mut self, inputs: InputsRef<'_>) {
        (**self).process_inputs(inputs)
    }

    fn end_cycle(&mut self) {
        (**self).end_cycle()
    }
}

/// 丢弃一切的输出
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn record(&mut self, _key: &str, _value: TelemetryValue) {}

    fn process_inputs(&mut self, _inputs: InputsRef<'_>) {}
}

/// 把 JSON 树展开为 `(prefix/path, value)` 列表
pub fn flatten(prefix: &str, tree: &Value) -> Vec<(String, TelemetryValue)> {
    let mut out = Vec::new();
    flatten_into(prefix.to_string(), tree, &mut out);
    out
}

fn flatten_into(key: String, value: &Value, out: &mut Vec<(String, TelemetryValue)>) {
    match value {
        Value::Object(map) => {
            for (field, child) in map {
                flatten_into(format!("{key}/{field}"), child, out);
            }
        },
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                flatten_into(format!("{key}/{i}"), child, out);
            }
        },
        Value::Number(n) => {
            if let Some(v) = n.as_f64() {
                out.push((key, TelemetryValue::Number(v)));
            }
        },
        Value::Bool(b) => out.push((key, TelemetryValue::Bool(*b))),
        Value::String(s) => out.push((key, TelemetryValue::Text(s.clone()))),
        Value::Null => {},
    }
}
