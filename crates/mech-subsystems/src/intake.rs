//! 进气臂控制器
//!
//! 俯仰臂在 PICKUP / STOW 两个命名位置之间切换，滚轮开环吸入。
//! 命名位置在每次设置目标时从可调参数重新解析。

use crate::subsystem::Subsystem;
use mech_config::{IntakeConfig, IntakeTunables};
use mech_hal::{IntakeInputs, IntakeIo, PivotGeometry};
use mech_telemetry::{InputsRef, TelemetrySink};
use mech_units::{Deg, DutyCycle, Rad};

/// 俯仰臂命名位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakePosition {
    /// 放下取料
    Pickup,
    /// 收起
    Stow,
}

impl IntakePosition {
    /// 当前配置下的机构角度
    pub fn angle(self, tunables: &IntakeTunables) -> Deg {
        match self {
            Self::Pickup => tunables.pickup_angle(),
            Self::Stow => tunables.stow_angle(),
        }
    }
}

/// 进气臂
pub struct Intake<B: IntakeIo> {
    io: B,
    inputs: IntakeInputs,
    target: IntakePosition,
    geometry: PivotGeometry,
    tunables: IntakeTunables,
}

impl<B: IntakeIo> Intake<B> {
    /// 上电时假定机构处于收起位置，目标为 STOW
    pub fn new(io: B, config: &IntakeConfig) -> Self {
        Self {
            io,
            inputs: IntakeInputs::default(),
            target: IntakePosition::Stow,
            geometry: PivotGeometry::from(&config.constants),
            tunables: config.tunables.clone(),
        }
    }

    /// 设置俯仰目标位置
    ///
    /// 角度按当前可调参数解析，加上零点偏移后下发（编码器坐标）。
    pub fn set_target_position(&mut self, position: IntakePosition) {
        self.target = position;
        let angle = position.angle(&self.tunables).to_rad();
        self.io.set_pivot_target(self.geometry.to_encoder(angle));
    }

    /// 俯仰开环输出（手动覆盖）
    pub fn set_pivot_duty_cycle(&mut self, duty: DutyCycle) {
        self.io.set_pivot_duty_cycle(duty);
    }

    /// 滚轮以吸入占空比运行
    pub fn run_rollers(&mut self) {
        self.io.set_roller_duty_cycle(self.tunables.acquire_duty());
    }

    pub fn stop_rollers(&mut self) {
        self.io.set_roller_duty_cycle(DutyCycle::ZERO);
    }

    /// 当前目标位置
    pub fn target_position(&self) -> IntakePosition {
        self.target
    }

    /// 当前目标角度（机构坐标，按当前可调参数）
    pub fn desired_angle(&self) -> Deg {
        self.target.angle(&self.tunables)
    }

    /// 最近一次快照
    pub fn inputs(&self) -> &IntakeInputs {
        &self.inputs
    }

    /// 当前俯仰角（机构坐标）
    pub fn current_angle(&self) -> Rad {
        self.geometry.to_mechanism(self.inputs.pivot_leader.position)
    }

    pub fn io(&self) -> &B {
        &self.io
    }
}

impl<B: IntakeIo> Subsystem for Intake<B> {
    fn name(&self) -> &'static str {
        "Intake"
    }

    fn periodic(&mut self, sink: &mut dyn TelemetrySink) {
        self.inputs = self.io.update_inputs(&self.inputs);
        sink.process_inputs(InputsRef::Intake(&self.inputs));

        sink.record_number("Intake/Current-Pivot-Angle", self.current_angle().to_deg().0);
        sink.record_number("Intake/Desired-Pivot-Angle", self.desired_angle().0);
    }

    /// 只停滚轮，俯仰臂保持当前位置目标
    fn stop(&mut self) {
        self.stop_rollers();
    }
}
