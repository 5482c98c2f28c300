//! 爬升机构（Climber）常量

use serde::{Deserialize, Serialize};

/// 爬升机构硬件常量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimberConstants {
    /// smart 电流限制（A）
    pub smart_current_limit: u32,
    /// 二级电流限制（A）
    pub secondary_current_limit: f64,
    /// 电机反转
    pub inverted: bool,
}

impl Default for ClimberConstants {
    fn default() -> Self {
        Self {
            smart_current_limit: 40,
            secondary_current_limit: 55.0,
            inverted: false,
        }
    }
}

impl ClimberConstants {
    pub(crate) fn publish(&self, out: &mut Vec<(String, f64)>) {
        out.push((
            "Constants/Climber/CLIMBER_SMART_CURRENT_LIMIT".into(),
            f64::from(self.smart_current_limit),
        ));
        out.push((
            "Constants/Climber/CLIMBER_SECONDARY_CURRENT_LIMIT".into(),
            self.secondary_current_limit,
        ));
        out.push((
            "Constants/Climber/CLIMBER_INVERTED".into(),
            if self.inverted { 1.0 } else { 0.0 },
        ));
    }
}
