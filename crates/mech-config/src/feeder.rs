//! 送料器（Feeder）常量

use serde::{Deserialize, Serialize};

/// 送料器硬件常量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeederConstants {
    /// smart 电流限制（A）
    pub smart_current_limit: u32,
    /// 二级电流限制（A）
    pub secondary_current_limit: f64,
    /// 电机反转
    pub inverted: bool,
}

impl Default for FeederConstants {
    fn default() -> Self {
        Self {
            smart_current_limit: 40,
            secondary_current_limit: 55.0,
            inverted: false,
        }
    }
}

impl FeederConstants {
    pub(crate) fn publish(&self, out: &mut Vec<(String, f64)>) {
        out.push((
            "Constants/Feeder/FEEDER_MOTOR_SMART_CURRENT_LIMIT".into(),
            f64::from(self.smart_current_limit),
        ));
        out.push((
            "Constants/Feeder/FEEDER_MOTOR_SECONDARY_CURRENT_LIMIT".into(),
            self.secondary_current_limit,
        ));
        out.push((
            "Constants/Feeder/FEEDER_MOTOR_INVERTED".into(),
            if self.inverted { 1.0 } else { 0.0 },
        ));
    }
}
