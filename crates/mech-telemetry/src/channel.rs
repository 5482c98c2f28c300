//! 异步输出（有界通道）
//!
//! 控制循环线程内只做 `try_send`，从不阻塞。队列满时丢弃事件并计数，
//! 由消费线程负责写盘或转发。
//!
//! ```rust
//! use mech_telemetry::{ChannelSink, TelemetryEvent, TelemetrySink};
//!
//! let (mut sink, rx) = ChannelSink::new(1024);
//! let dropped = sink.dropped_events().clone();
//!
//! sink.record_number("Feeder/motor/velocity", 1.0);
//! sink.end_cycle();
//!
//! assert!(matches!(rx.try_recv(), Ok(TelemetryEvent::Value { cycle: 0, .. })));
//! assert!(matches!(rx.try_recv(), Ok(TelemetryEvent::CycleEnd { cycle: 0 })));
//! assert_eq!(dropped.load(std::sync::atomic::Ordering::Relaxed), 0);
//! ```

use crate::sink::TelemetrySink;
use crate::value::TelemetryValue;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 默认队列容量（约 10 秒 @ 50 Hz × 每周期 200 个 key）
pub const DEFAULT_CAPACITY: usize = 100_000;

/// 通道事件
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    /// 一个 key 的值
    Value {
        cycle: u64,
        key: String,
        value: TelemetryValue,
    },
    /// 周期结束
    CycleEnd { cycle: u64 },
}

/// 非阻塞通道输出
pub struct ChannelSink {
    tx: Sender<TelemetryEvent>,
    cycle: u64,
    dropped_events: Arc<AtomicU64>,
    sent_events: Arc<AtomicU64>,
}

impl ChannelSink {
    /// 创建输出与接收端
    #[must_use]
    pub fn new(capacity: usize) -> (Self, Receiver<TelemetryEvent>) {
        let (tx, rx) = bounded(capacity);
        let sink = Self {
            tx,
            cycle: 0,
            dropped_events: Arc::new(AtomicU64::new(0)),
            sent_events: Arc::new(AtomicU64::new(0)),
        };
        (sink, rx)
    }

    /// 丢弃事件计数器
    pub fn dropped_events(&self) -> &Arc<AtomicU64> {
        &self.dropped_events
    }

    /// 成功发送事件计数器
    pub fn sent_events(&self) -> &Arc<AtomicU64> {
        &self.sent_events
    }

    fn send(&self, event: TelemetryEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {
                self.sent_events.fetch_add(1, Ordering::Relaxed);
            },
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                self.dropped_events.fetch_add(1, Ordering::Relaxed);
            },
        }
    }
}

impl TelemetrySink for ChannelSink {
    fn record(&mut self, key: &str, value: TelemetryValue) {
        self.send(TelemetryEvent::Value {
            cycle: self.cycle,
            key: key.to_string(),
            value,
        });
    }

    fn end_cycle(&mut self) {
        self.send(TelemetryEvent::CycleEnd { cycle: self.cycle });
        self.cycle += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_queue_drops() {
        let (mut sink, rx) = ChannelSink::new(2);
        for i in 0..5 {
            sink.record_number("K", f64::from(i));
        }
        assert_eq!(sink.dropped_events().load(Ordering::Relaxed), 3);
        assert_eq!(sink.sent_events().load(Ordering::Relaxed), 2);
        assert_eq!(rx.len(), 2);
    }

    #[test]
    fn test_disconnected_receiver_drops() {
        let (mut sink, rx) = ChannelSink::new(8);
        drop(rx);
        sink.record_bool("K", true);
        assert_eq!(sink.dropped_events().load(Ordering::Relaxed), 1);
    }
}
