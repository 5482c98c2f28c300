//! 错误类型定义

use thiserror::Error;

/// 查表构造错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// 没有任何点
    #[error("lookup table is empty")]
    Empty,

    /// 含 NaN 或无穷
    #[error("lookup point {index} is not finite: ({x}, {y})")]
    NonFinite { index: usize, x: f64, y: f64 },

    /// 重复的 key
    #[error("duplicate lookup key: {0}")]
    DuplicateKey(f64),
}

/// 控制循环配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoopError {
    #[error("Invalid frequency_hz: {0} (must be > 0)")]
    InvalidFrequency(f64),

    #[error("Invalid dt_clamp_multiplier: {0} (must be > 0)")]
    InvalidClampMultiplier(f64),
}
