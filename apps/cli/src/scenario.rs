//! 命令层示例序列
//!
//! 每个周期在子系统更新之后推进一步；序列只通过控制器的公开操作驱动机构。
//!
//! - `shoot`：按距离查表起转 → 等待到速 → 送料 → 全部停止
//! - `intake`：放下并吸入 → 收起并停滚轮
//! - `idle`：不下发任何命令

use crate::robot::Robot;
use clap::ValueEnum;
use mech_hal::{ClimberIo, FeederIo, IntakeIo, ShooterIo};
use mech_subsystems::{IntakePosition, Tick};
use mech_units::{Deg, DutyCycle, Meters};
use std::fmt;
use std::ops::ControlFlow;

/// 送料占空比
const FEED_DUTY: f64 = 0.8;
/// 送料持续周期数
const FEED_TICKS: u64 = 25;
/// 到达命名位置的角度窗口
const POSITION_WINDOW: Deg = Deg(2.0);
/// 取料停留周期数
const PICKUP_TICKS: u64 = 50;

/// 序列种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    Shoot,
    Intake,
    Idle,
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Shoot => "shoot",
            Self::Intake => "intake",
            Self::Idle => "idle",
        };
        f.write_str(name)
    }
}

impl ScenarioKind {
    /// 从日志备注 `scenario=<name>` 中解析
    pub fn from_notes(notes: &str) -> Option<Self> {
        notes
            .split_whitespace()
            .find_map(|token| token.strip_prefix("scenario="))
            .and_then(|name| Self::from_str(name, true).ok())
    }
}

/// 从日志备注 `distance=<m>` 中解析
pub fn distance_from_notes(notes: &str) -> Option<f64> {
    notes
        .split_whitespace()
        .find_map(|token| token.strip_prefix("distance="))
        .and_then(|value| value.parse().ok())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Start,
    SpinUp,
    Feeding { until: u64 },
    Lowering,
    Collecting { until: u64 },
    Raising,
    Done,
}

/// 序列执行器
#[derive(Debug, Clone)]
pub struct Scenario {
    kind: ScenarioKind,
    distance: Meters,
    step: Step,
}

impl Scenario {
    pub fn new(kind: ScenarioKind, distance: Meters) -> Self {
        Self {
            kind,
            distance,
            step: Step::Start,
        }
    }

    /// 序列是否已完成
    pub fn is_done(&self) -> bool {
        self.step == Step::Done
    }

    /// 推进一步；完成时返回 `Break`
    pub fn advance<I, S, F, C>(&mut self, robot: &mut Robot<I, S, F, C>, tick: &Tick) -> ControlFlow<()>
    where
        I: IntakeIo,
        S: ShooterIo,
        F: FeederIo,
        C: ClimberIo,
    {
        let next = match (self.kind, self.step) {
            (ScenarioKind::Idle, _) => Step::Start,

            (ScenarioKind::Shoot, Step::Start) => {
                let velocity = robot.shooter.velocity_for_distance(self.distance);
                tracing::info!(distance = %self.distance, target = %velocity.to_rpm(), "spinning up");
                robot.shooter.set_flywheel_velocity(velocity);
                Step::SpinUp
            },
            (ScenarioKind::Shoot, Step::SpinUp) => {
                if robot.shooter.is_at_target_speed() {
                    tracing::info!(iteration = tick.iteration, "at speed, feeding");
                    robot.feeder.set_speed(DutyCycle::new(FEED_DUTY));
                    Step::Feeding {
                        until: tick.iteration + FEED_TICKS,
                    }
                } else {
                    Step::SpinUp
                }
            },
            (ScenarioKind::Shoot, Step::Feeding { until }) if tick.iteration >= until => {
                robot.feeder.stop();
                robot.shooter.stop_flywheels();
                Step::Done
            },

            (ScenarioKind::Intake, Step::Start) => {
                robot.intake.set_target_position(IntakePosition::Pickup);
                robot.intake.run_rollers();
                Step::Lowering
            },
            (ScenarioKind::Intake, Step::Lowering) => {
                if at_desired_angle(robot) {
                    tracing::info!(iteration = tick.iteration, "at pickup, collecting");
                    Step::Collecting {
                        until: tick.iteration + PICKUP_TICKS,
                    }
                } else {
                    Step::Lowering
                }
            },
            (ScenarioKind::Intake, Step::Collecting { until }) if tick.iteration >= until => {
                robot.intake.stop_rollers();
                robot.intake.set_target_position(IntakePosition::Stow);
                Step::Raising
            },
            (ScenarioKind::Intake, Step::Raising) => {
                if at_desired_angle(robot) {
                    Step::Done
                } else {
                    Step::Raising
                }
            },

            (_, step) => step,
        };

        if next != self.step {
            tracing::debug!(scenario = %self.kind, from = ?self.step, to = ?next, "scenario step");
        }
        self.step = next;

        if self.is_done() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// 俯仰臂是否已在当前目标附近
fn at_desired_angle<I, S, F, C>(robot: &Robot<I, S, F, C>) -> bool
where
    I: IntakeIo,
    S: ShooterIo,
    F: FeederIo,
    C: ClimberIo,
{
    let error = robot.intake.current_angle().to_deg() - robot.intake.desired_angle();
    error.abs() <= POSITION_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_round_trip() {
        let notes = "scenario=intake distance=2.5";
        assert_eq!(ScenarioKind::from_notes(notes), Some(ScenarioKind::Intake));
        assert_eq!(distance_from_notes(notes), Some(2.5));
        assert_eq!(ScenarioKind::from_notes("nothing here"), None);
    }
}
