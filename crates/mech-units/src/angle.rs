//! 角度单位（弧度 / 角度）

use std::f64::consts::{PI, TAU};

/// 弧度（NewType）
///
/// 表示角度的弧度值。使用 NewType 模式防止与角度值混淆。
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Rad(pub f64);

impl_quantity!(Rad, "{:.4} rad");

impl Rad {
    /// π 弧度（180度）
    pub const PI: Self = Rad(PI);

    /// 2π 弧度（360度）
    pub const TAU: Self = Rad(TAU);

    /// 从机械圈数转换（1 圈 = 2π rad）
    #[inline]
    pub fn from_rotations(rotations: f64) -> Self {
        Rad(rotations * TAU)
    }

    /// 转换为机械圈数
    #[inline]
    pub fn to_rotations(self) -> f64 {
        self.0 / TAU
    }

    /// 转换为角度
    #[inline]
    pub fn to_deg(self) -> Deg {
        Deg(self.0.to_degrees())
    }

    /// 计算正弦值
    #[inline]
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// 计算余弦值
    #[inline]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    /// 归一化到 [-π, π] 范围
    pub fn normalize(self) -> Self {
        let mut angle = self.0 % TAU;
        if angle > PI {
            angle -= TAU;
        } else if angle < -PI {
            angle += TAU;
        }
        Rad(angle)
    }
}

/// 角度（NewType）
///
/// 机构的命名位置（PICKUP / STOW）以角度配置，进入硬件边界前转换为弧度。
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Deg(pub f64);

impl_quantity!(Deg, "{:.2}°");

impl Deg {
    /// 转换为弧度
    #[inline]
    pub fn to_rad(self) -> Rad {
        Rad(self.0.to_radians())
    }

    /// 归一化到 [-180, 180] 范围
    pub fn normalize(self) -> Self {
        let mut angle = self.0 % 360.0;
        if angle > 180.0 {
            angle -= 360.0;
        } else if angle < -180.0 {
            angle += 360.0;
        }
        Deg(angle)
    }
}

impl From<Deg> for Rad {
    fn from(deg: Deg) -> Self {
        deg.to_rad()
    }
}

impl From<Rad> for Deg {
    fn from(rad: Rad) -> Self {
        rad.to_deg()
    }
}
