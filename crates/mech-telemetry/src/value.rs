//! 遥测值与快照引用

use mech_hal::{ClimberInputs, FeederInputs, IntakeInputs, ShooterInputs};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 单个遥测值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl TelemetryValue {
    /// 数值（非数值类型返回 None）
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// 布尔值（非布尔类型返回 None）
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for TelemetryValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for TelemetryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for TelemetryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for TelemetryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for TelemetryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// 某个子系统本周期快照的借用
#[derive(Debug, Clone, Copy)]
pub enum InputsRef<'a> {
    Intake(&'a IntakeInputs),
    Shooter(&'a ShooterInputs),
    Feeder(&'a FeederInputs),
    Climber(&'a ClimberInputs),
}

impl InputsRef<'_> {
    /// 子系统名（遥测 key 的第一级）
    pub fn subsystem(&self) -> &'static str {
        match self {
            Self::Intake(_) => "Intake",
            Self::Shooter(_) => "Shooter",
            Self::Feeder(_) => "Feeder",
            Self::Climber(_) => "Climber",
        }
    }

    /// 转为 JSON 树
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::Intake(inputs) => serde_json::to_value(inputs),
            Self::Shooter(inputs) => serde_json::to_value(inputs),
            Self::Feeder(inputs) => serde_json::to_value(inputs),
            Self::Climber(inputs) => serde_json::to_value(inputs),
        }
    }
}

impl<'a> From<&'a IntakeInputs> for InputsRef<'a> {
    fn from(inputs: &'a IntakeInputs) -> Self {
        Self::Intake(inputs)
    }
}

impl<'a> From<&'a ShooterInputs> for InputsRef<'a> {
    fn from(inputs: &'a ShooterInputs) -> Self {
        Self::Shooter(inputs)
    }
}

impl<'a> From<&'a FeederInputs> for InputsRef<'a> {
    fn from(inputs: &'a FeederInputs) -> Self {
        Self::Feeder(inputs)
    }
}

impl<'a> From<&'a ClimberInputs> for InputsRef<'a> {
    fn from(inputs: &'a ClimberInputs) -> Self {
        Self::Climber(inputs)
    }
}
