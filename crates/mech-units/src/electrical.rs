//! 电气单位

/// 电压（伏特）
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Volts(pub f64);

impl_quantity!(Volts, "{:.2} V");

/// 电流（安培）
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Amps(pub f64);

impl_quantity!(Amps, "{:.2} A");
