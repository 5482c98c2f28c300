//! # Mech Telemetry
//!
//! 遥测输出与录制日志。
//!
//! 控制器通过 [`TelemetrySink`] 只写地发布快照与派生量；
//! [`RecordingSink`] 把快照录制为 [`TelemetryLog`]，供 Replay 后端回放。
//!
//! ```rust
//! use mech_telemetry::{MemorySink, TelemetrySink};
//!
//! let mut sink = MemorySink::new();
//! sink.record_bool("Shooter/At-Target-Speed", true);
//! sink.end_cycle();
//! assert_eq!(sink.flag("Shooter/At-Target-Speed"), Some(true));
//! ```

pub mod channel;
pub mod fanout;
pub mod log;
pub mod memory;
pub mod recording;
pub mod sink;
pub mod trace;
pub mod value;

pub use channel::{ChannelSink, DEFAULT_CAPACITY, TelemetryEvent};
pub use fanout::FanoutSink;
pub use log::{LOG_VERSION, LogFrame, LogMetadata, MAGIC, TelemetryLog};
pub use memory::MemorySink;
pub use recording::RecordingSink;
pub use sink::{NullSink, TelemetrySink, flatten};
pub use trace::TracingSink;
pub use value::{InputsRef, TelemetryValue};
