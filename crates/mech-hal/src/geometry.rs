//! 俯仰机构坐标换算
//!
//! 机构坐标（mechanism-space）：0° 为完全收起，角度增大朝向地面。
//! 编码器坐标（encoder-space）：绝对编码器原始读数换算后的角度。
//!
//! ```text
//! encoder = mechanism + zero_offset
//! ```
//!
//! 读写两个方向都只经过这里的函数。

use mech_units::Rad;

/// 俯仰几何
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotGeometry {
    /// 机械零点偏移
    pub zero_offset: Rad,
    /// 软限位下限（机构坐标）
    pub min: Rad,
    /// 软限位上限（机构坐标）
    pub max: Rad,
}

impl PivotGeometry {
    /// 创建几何描述
    pub fn new(zero_offset: Rad, min: Rad, max: Rad) -> Self {
        Self { zero_offset, min, max }
    }

    /// 机构坐标 -> 编码器坐标
    #[inline]
    pub fn to_encoder(&self, mechanism: Rad) -> Rad {
        mechanism + self.zero_offset
    }

    /// 编码器坐标 -> 机构坐标
    #[inline]
    pub fn to_mechanism(&self, encoder: Rad) -> Rad {
        encoder - self.zero_offset
    }

    /// 将编码器坐标目标限制在机构软限位内
    pub fn clamp_encoder(&self, encoder: Rad) -> Rad {
        let mechanism = self.to_mechanism(encoder).clamp(self.min, self.max);
        self.to_encoder(mechanism)
    }
}

impl From<&mech_config::IntakeConstants> for PivotGeometry {
    fn from(constants: &mech_config::IntakeConstants) -> Self {
        Self::new(constants.zero_offset(), constants.min_angle(), constants.max_angle())
    }
}
