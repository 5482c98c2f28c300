use crate::configure::{CONFIGURE_ATTEMPTS, absorb, try_until_ok};
use crate::follower::{FollowerSign, LeaderFollower};
use crate::geometry::PivotGeometry;
use crate::inputs::IntakeInputs;
use crate::io::{ActuatorIo, IntakeIo};
use crate::motor::{ControlType, DigitalInput, EncoderConversion, MotorController};
use crate::presets;
use crate::sample::{retain, sample_motor};
use mech_config::IntakeConfig;
use mech_units::{DutyCycle, Rad};

/// 真实进气臂：双俯仰电机（主从）、滚轮电机、上限位开关
pub struct RealIntakeIo<M, D> {
    pivot: LeaderFollower<M>,
    roller: M,
    upper_limit_switch: D,
    geometry: PivotGeometry,
    pivot_conversion: EncoderConversion,
    roller_conversion: EncoderConversion,
}

impl<M: MotorController, D: DigitalInput> RealIntakeIo<M, D> {
    /// 配置全部电机并组装后端
    ///
    /// 从电机使用与主电机相同的反转标志，方向关系只由 [`FollowerSign`] 提供。
    pub fn new(
        leader: M,
        follower: M,
        mut roller: M,
        upper_limit_switch: D,
        config: &IntakeConfig,
    ) -> Self {
        let pivot_config = presets::intake_pivot(config);
        let roller_config = presets::intake_roller(config);
        let sign = FollowerSign::from_opposed(config.constants.follower_opposed);
        let mut pivot = LeaderFollower::new(leader, follower, sign);

        try_until_ok("intake_pivot_leader", CONFIGURE_ATTEMPTS, || {
            pivot.configure_leader(&pivot_config)
        });
        try_until_ok("intake_pivot_follower", CONFIGURE_ATTEMPTS, || {
            pivot.configure_follower(&pivot_config)
        });
        try_until_ok("intake_roller", CONFIGURE_ATTEMPTS, || {
            roller.configure(&roller_config)
        });

        Self {
            pivot,
            roller,
            upper_limit_switch,
            geometry: PivotGeometry::from(&config.constants),
            pivot_conversion: pivot_config.conversion(),
            roller_conversion: roller_config.conversion(),
        }
    }

    /// 俯仰主从电机组
    pub fn pivot(&self) -> &LeaderFollower<M> {
        &self.pivot
    }

    /// 滚轮电机
    pub fn roller(&self) -> &M {
        &self.roller
    }

    pub fn geometry(&self) -> PivotGeometry {
        self.geometry
    }
}

impl<M: MotorController, D: DigitalInput> ActuatorIo for RealIntakeIo<M, D> {
    type Inputs = IntakeInputs;

    fn update_inputs(&mut self, previous: &IntakeInputs) -> IntakeInputs {
        IntakeInputs {
            pivot_leader: sample_motor(
                self.pivot.leader(),
                &self.pivot_conversion,
                &previous.pivot_leader,
            ),
            pivot_follower: sample_motor(
                self.pivot.follower(),
                &self.pivot_conversion,
                &previous.pivot_follower,
            ),
            roller: sample_motor(&self.roller, &self.roller_conversion, &previous.roller),
            upper_limit_switch: self
                .upper_limit_switch
                .get()
                .unwrap_or_else(|e| retain("upper_limit_switch", e, previous.upper_limit_switch)),
        }
    }
}

impl<M: MotorController, D: DigitalInput> IntakeIo for RealIntakeIo<M, D> {
    fn set_pivot_target(&mut self, encoder_angle: Rad) {
        let clamped = self.geometry.clamp_encoder(encoder_angle);
        if clamped != encoder_angle {
            tracing::debug!(requested = %encoder_angle, clamped = %clamped, "pivot target clamped");
        }
        let rotations = self.pivot_conversion.raw_position(clamped);
        absorb(
            "intake_pivot",
            "set_reference",
            self.pivot.set_reference(rotations, ControlType::Position),
        );
    }

    fn set_pivot_duty_cycle(&mut self, duty: DutyCycle) {
        absorb("intake_pivot", "set_duty_cycle", self.pivot.set_duty_cycle(duty.value()));
    }

    fn set_roller_duty_cycle(&mut self, duty: DutyCycle) {
        absorb("intake_roller", "set_duty_cycle", self.roller.set_duty_cycle(duty.value()));
    }
}
