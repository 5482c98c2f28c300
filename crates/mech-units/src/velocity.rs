//! 角速度单位（rad/s 与 RPM）
//!
//! 闭环控制器内部统一使用 rad/s；查表与人类可读的日志使用 RPM。

use std::f64::consts::TAU;

/// 弧度每秒
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct RadPerSec(pub f64);

impl_quantity!(RadPerSec, "{:.3} rad/s");

impl RadPerSec {
    /// 转换为 RPM
    #[inline]
    pub fn to_rpm(self) -> Rpm {
        Rpm(self.0 * 60.0 / TAU)
    }
}

/// 每分钟转数
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Rpm(pub f64);

impl_quantity!(Rpm, "{:.1} RPM");

impl Rpm {
    /// 转换为 rad/s
    #[inline]
    pub fn to_rad_per_sec(self) -> RadPerSec {
        RadPerSec(self.0 * TAU / 60.0)
    }
}

impl From<Rpm> for RadPerSec {
    fn from(rpm: Rpm) -> Self {
        rpm.to_rad_per_sec()
    }
}

impl From<RadPerSec> for Rpm {
    fn from(speed: RadPerSec) -> Self {
        speed.to_rpm()
    }
}
