//! 温度单位

/// 摄氏度
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Celsius(pub f64);

impl_quantity!(Celsius, "{:.1} °C");
