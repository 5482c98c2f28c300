//! 固定频率控制循环
//!
//! 每个周期按注册顺序调用每个子系统的 `periodic` 恰好一次，
//! 随后结束遥测周期，最后调用命令层钩子。
//!
//! # 时间处理
//!
//! - 使用 `spin_sleep` 休眠到下一周期起点（不累积漂移）
//! - 实际 dt 超过 `dt_clamp_multiplier × 周期` 时记为一次超时并钳位 dt
//!
//! ```rust
//! use mech_subsystems::{ControlLoop, LoopConfig, Subsystem};
//! use mech_telemetry::{MemorySink, TelemetrySink};
//! use std::ops::ControlFlow;
//!
//! struct Counter(u32);
//!
//! impl Subsystem for Counter {
//!     fn name(&self) -> &'static str { "Counter" }
//!     fn periodic(&mut self, sink: &mut dyn TelemetrySink) {
//!         self.0 += 1;
//!         sink.record_number("Counter/value", f64::from(self.0));
//!     }
//!     fn stop(&mut self) {}
//! }
//!
//! let config = LoopConfig { frequency_hz: 1000.0, max_iterations: Some(3), ..LoopConfig::default() };
//! let mut control = ControlLoop::new(config)?;
//! let mut subsystems = vec![Counter(0)];
//! let mut sink = MemorySink::new();
//!
//! let ticks = control.run(&mut subsystems, &mut sink, |_, _| ControlFlow::Continue(()));
//! assert_eq!(ticks, 3);
//! assert_eq!(sink.number("Counter/value"), Some(3.0));
//! # Ok::<(), mech_subsystems::LoopError>(())
//! ```

use crate::error::LoopError;
use crate::subsystem::SubsystemSet;
use mech_telemetry::TelemetrySink;
use spin_sleep::SpinSleeper;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// 控制循环配置
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// 控制频率（Hz）
    pub frequency_hz: f64,

    /// dt 钳位倍数
    ///
    /// 例如：2.0 表示 dt 最大为 2 * (1 / frequency_hz)
    pub dt_clamp_multiplier: f64,

    /// 最大迭代次数（None 表示直到钩子返回 Break）
    pub max_iterations: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 50.0,
            dt_clamp_multiplier: 2.0,
            max_iterations: None,
        }
    }
}

impl From<&mech_config::LoopSettings> for LoopConfig {
    fn from(settings: &mech_config::LoopSettings) -> Self {
        Self {
            frequency_hz: settings.frequency_hz,
            dt_clamp_multiplier: settings.dt_clamp_multiplier,
            max_iterations: None,
        }
    }
}

/// 一个周期的信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// 周期序号（从 0 开始）
    pub iteration: u64,
    /// 钳位后的 dt
    pub dt: Duration,
    /// 本周期 dt 是否超过上限
    pub overrun: bool,
}

/// 固定频率控制循环
#[derive(Debug)]
pub struct ControlLoop {
    config: LoopConfig,
    period: Duration,
    max_dt: Duration,
    iteration: u64,
    overruns: u64,
    last_tick: Option<Instant>,
}

impl ControlLoop {
    /// 校验配置并创建循环
    pub fn new(config: LoopConfig) -> Result<Self, LoopError> {
        if !(config.frequency_hz > 0.0 && config.frequency_hz.is_finite()) {
            return Err(LoopError::InvalidFrequency(config.frequency_hz));
        }
        if config.frequency_hz > 10000.0 {
            tracing::warn!(
                "Very high control frequency: {} Hz. This may cause performance issues.",
                config.frequency_hz
            );
        }
        if !(config.dt_clamp_multiplier > 0.0 && config.dt_clamp_multiplier.is_finite()) {
            return Err(LoopError::InvalidClampMultiplier(config.dt_clamp_multiplier));
        }

        let period = Duration::from_secs_f64(1.0 / config.frequency_hz);
        let max_dt = period.mul_f64(config.dt_clamp_multiplier);
        Ok(Self {
            config,
            period,
            max_dt,
            iteration: 0,
            overruns: 0,
            last_tick: None,
        })
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// 标称周期
    pub fn period(&self) -> Duration {
        self.period
    }

    /// 已完成的周期数
    pub fn iterations(&self) -> u64 {
        self.iteration
    }

    /// dt 超限次数
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// 执行一个周期（不休眠）
    pub fn tick<R>(&mut self, subsystems: &mut R, sink: &mut dyn TelemetrySink) -> Tick
    where
        R: SubsystemSet + ?Sized,
    {
        let now = Instant::now();
        let real_dt = self.last_tick.map_or(self.period, |last| now - last);
        let overrun = real_dt > self.max_dt;
        if overrun {
            self.overruns += 1;
            tracing::warn!(
                iteration = self.iteration,
                real_dt_ms = real_dt.as_secs_f64() * 1000.0,
                "control loop overrun, clamping dt"
            );
        }

        subsystems.for_each_subsystem(&mut |subsystem| subsystem.periodic(sink));
        sink.end_cycle();

        let tick = Tick {
            iteration: self.iteration,
            dt: real_dt.min(self.max_dt),
            overrun,
        };
        self.last_tick = Some(now);
        self.iteration += 1;
        tick
    }

    /// 以固定频率运行，直到达到 `max_iterations` 或钩子返回 `Break`
    ///
    /// 钩子在每个周期的子系统更新之后调用，相当于命令层。
    /// 返回本次运行执行的周期数。
    pub fn run<R, F>(&mut self, subsystems: &mut R, sink: &mut dyn TelemetrySink, mut hook: F) -> u64
    where
        R: SubsystemSet + ?Sized,
        F: FnMut(&mut R, &Tick) -> ControlFlow<()>,
    {
        let sleeper = SpinSleeper::default();
        let mut ran = 0;
        let mut next_deadline = Instant::now();

        loop {
            if let Some(max_iter) = self.config.max_iterations
                && ran >= max_iter
            {
                break;
            }

            let tick = self.tick(subsystems, sink);
            ran += 1;
            if hook(subsystems, &tick).is_break() {
                break;
            }

            next_deadline += self.period;
            let now = Instant::now();
            if next_deadline > now {
                sleeper.sleep(next_deadline - now);
            } else {
                // 已落后，从当前时刻重新对齐
                next_deadline = now;
            }
        }

        tracing::debug!(ticks = ran, overruns = self.overruns, "control loop finished");
        ran
    }
}
