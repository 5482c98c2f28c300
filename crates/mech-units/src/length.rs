//! 长度单位

/// 米
///
/// 射手查表的距离输入单位。
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Meters(pub f64);

impl_quantity!(Meters, "{:.3} m");
