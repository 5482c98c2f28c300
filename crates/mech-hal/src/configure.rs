//! 配置重试与命令故障吸收

use crate::error::MotorError;

/// 启动时配置写入的最大尝试次数
pub const CONFIGURE_ATTEMPTS: u32 = 5;

/// 最多尝试 `attempts` 次，直到 `op` 成功
///
/// 每次失败记录 `warn!`，用尽后记录 `error!` 并返回 `false`。
/// 错误不会向上传播。
///
/// # 示例
///
/// ```rust
/// use mech_hal::{try_until_ok, MotorError};
///
/// let mut calls = 0;
/// let ok = try_until_ok("flywheel", 5, || {
///     calls += 1;
///     if calls < 3 { Err(MotorError::Timeout) } else { Ok(()) }
/// });
/// assert!(ok);
/// assert_eq!(calls, 3);
/// ```
pub fn try_until_ok<F>(name: &str, attempts: u32, mut op: F) -> bool
where
    F: FnMut() -> Result<(), MotorError>,
{
    for attempt in 1..=attempts {
        match op() {
            Ok(()) => return true,
            Err(e) => {
                tracing::warn!(motor = name, attempt, attempts, error = %e, "configure failed");
            },
        }
    }
    tracing::error!(
        motor = name,
        attempts,
        "configure retries exhausted, continuing with last known configuration"
    );
    false
}

/// 吸收命令写入失败
///
/// 执行器保持上一条成功命令的输出，故障只出现在日志中。
pub(crate) fn absorb(motor: &str, command: &'static str, result: Result<(), MotorError>) {
    if let Err(e) = result {
        tracing::warn!(motor, command, error = %e, "command rejected, keeping last output");
    }
}
