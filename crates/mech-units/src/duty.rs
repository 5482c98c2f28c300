//! 占空比（开环输出）

use std::fmt;

/// 占空比
///
/// 开环输出比例，范围 [-1.0, 1.0]，-1.0 为反向满输出，1.0 为正向满输出。
/// 构造时饱和到合法范围，NaN 视为 0。
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct DutyCycle(f64);

impl DutyCycle {
    /// 停止输出
    pub const ZERO: Self = DutyCycle(0.0);

    /// 正向满输出
    pub const FULL_FORWARD: Self = DutyCycle(1.0);

    /// 反向满输出
    pub const FULL_REVERSE: Self = DutyCycle(-1.0);

    /// 创建占空比（饱和到 [-1.0, 1.0]）
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        DutyCycle(value.clamp(-1.0, 1.0))
    }

    /// 获取原始值
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// 是否为零输出
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for DutyCycle {
    fn from(value: f64) -> Self {
        DutyCycle::new(value)
    }
}

impl std::ops::Neg for DutyCycle {
    type Output = Self;
    fn neg(self) -> Self {
        DutyCycle(-self.0)
    }
}

impl fmt::Display for DutyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}
