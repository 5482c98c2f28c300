//! 日志回放后端
//!
//! 快照来自录制日志，命令全部忽略（回放永不驱动硬件）。
//! 日志读尽后持续返回最后一帧。

use crate::inputs::{ClimberInputs, FeederInputs, IntakeInputs, ShooterInputs};
use crate::io::{ActuatorIo, ClimberIo, FeederIo, IntakeIo, ShooterIo};
use mech_units::{DutyCycle, Rad, RadPerSec};
use std::collections::VecDeque;

/// 回放后端
#[derive(Debug, Clone)]
pub struct ReplayIo<T> {
    frames: VecDeque<T>,
    consumed: usize,
}

impl<T> ReplayIo<T> {
    /// 由录制帧序列构造
    pub fn new(frames: impl IntoIterator<Item = T>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            consumed: 0,
        }
    }

    /// 剩余帧数
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// 已回放帧数
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// 是否已读尽
    pub fn is_exhausted(&self) -> bool {
        self.frames.is_empty()
    }
}

impl<T: Copy + Default> ActuatorIo for ReplayIo<T> {
    type Inputs = T;

    fn update_inputs(&mut self, previous: &T) -> T {
        match self.frames.pop_front() {
            Some(frame) => {
                self.consumed += 1;
                frame
            },
            None => *previous,
        }
    }
}

impl IntakeIo for ReplayIo<IntakeInputs> {
    fn set_pivot_target(&mut self, encoder_angle: Rad) {
        tracing::trace!(%encoder_angle, "replay: ignoring pivot target");
    }

    fn set_pivot_duty_cycle(&mut self, duty: DutyCycle) {
        tracing::trace!(%duty, "replay: ignoring pivot duty cycle");
    }

    fn set_roller_duty_cycle(&mut self, duty: DutyCycle) {
        tracing::trace!(%duty, "replay: ignoring roller duty cycle");
    }
}

impl ShooterIo for ReplayIo<ShooterInputs> {
    fn set_flywheel_velocity(&mut self, velocity: RadPerSec) {
        tracing::trace!(%velocity, "replay: ignoring flywheel velocity");
    }

    fn set_flywheel_duty_cycle(&mut self, duty: DutyCycle) {
        tracing::trace!(%duty, "replay: ignoring flywheel duty cycle");
    }

    fn stop_flywheel(&mut self) {
        tracing::trace!("replay: ignoring flywheel stop");
    }
}

impl FeederIo for ReplayIo<FeederInputs> {
    fn set_duty_cycle(&mut self, duty: DutyCycle) {
        tracing::trace!(%duty, "replay: ignoring feeder duty cycle");
    }
}

impl ClimberIo for ReplayIo<ClimberInputs> {
    fn set_duty_cycle(&mut self, duty: DutyCycle) {
        tracing::trace!(%duty, "replay: ignoring climber duty cycle");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::MotorInputs;

    fn frame(rad_s: f64) -> ShooterInputs {
        ShooterInputs {
            flywheel: MotorInputs {
                velocity: RadPerSec(rad_s),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_yields_frames_in_order() {
        let mut io = ReplayIo::new([frame(1.0), frame(2.0)]);
        let a = io.update_inputs(&ShooterInputs::default());
        let b = io.update_inputs(&a);
        assert_eq!(a, frame(1.0));
        assert_eq!(b, frame(2.0));
        assert_eq!(io.consumed(), 2);
    }

    #[test]
    fn test_exhausted_holds_last() {
        let mut io = ReplayIo::new([frame(3.0)]);
        let a = io.update_inputs(&ShooterInputs::default());
        let b = io.update_inputs(&a);
        assert!(io.is_exhausted());
        assert_eq!(b, frame(3.0));
    }

    #[test]
    fn test_commands_are_noops() {
        let mut io = ReplayIo::new([frame(3.0)]);
        io.set_flywheel_velocity(RadPerSec(500.0));
        io.stop_flywheel();
        assert_eq!(io.remaining(), 1);
        assert_eq!(io.update_inputs(&ShooterInputs::default()), frame(3.0));
    }
}
