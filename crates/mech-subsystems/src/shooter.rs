//! 射手控制器
//!
//! 飞轮速度闭环，带按比例容差的到速判断与距离查表。

use crate::lookup::LookupTable;
use crate::subsystem::Subsystem;
use mech_config::{ShooterConfig, ShooterTunables};
use mech_hal::{ShooterInputs, ShooterIo};
use mech_telemetry::{InputsRef, TelemetrySink};
use mech_units::{Meters, RadPerSec, Rpm};

/// 到速判断：`|measured - target| <= |target| × tolerance`
///
/// `target == 0` 时仅在 `measured == 0` 时成立。
pub fn within_tolerance(measured: RadPerSec, target: RadPerSec, tolerance: f64) -> bool {
    (measured - target).abs().0 <= (target * tolerance).abs().0
}

/// 射手
pub struct Shooter<B: ShooterIo> {
    io: B,
    inputs: ShooterInputs,
    target: RadPerSec,
    tunables: ShooterTunables,
    last_calculation: Option<(Meters, Rpm)>,
}

impl<B: ShooterIo> Shooter<B> {
    /// 构造后立即停止飞轮
    pub fn new(io: B, config: &ShooterConfig) -> Self {
        let mut shooter = Self {
            io,
            inputs: ShooterInputs::default(),
            target: RadPerSec::ZERO,
            tunables: config.tunables.clone(),
            last_calculation: None,
        };
        shooter.stop_flywheels();
        shooter
    }

    /// 设置飞轮目标速度（速度闭环）
    pub fn set_flywheel_velocity(&mut self, velocity: RadPerSec) {
        self.target = velocity;
        self.io.set_flywheel_velocity(velocity);
    }

    /// 以可调默认转速运行
    pub fn set_default_speed(&mut self) {
        self.set_flywheel_velocity(Rpm(self.tunables.flywheel_speed_rpm.get()).to_rad_per_sec());
    }

    /// 目标清零并停止飞轮（后端同时清除积分累加器）
    pub fn stop_flywheels(&mut self) {
        self.target = RadPerSec::ZERO;
        self.io.stop_flywheel();
    }

    /// 飞轮是否已到目标转速（容差为当前可调值）
    pub fn is_at_target_speed(&self) -> bool {
        within_tolerance(self.inputs.flywheel.velocity, self.target, self.tunables.tolerance.get())
    }

    /// 按距离查表得到飞轮目标速度
    ///
    /// 每次查询都从当前可调参数重建查表；查表无效时返回下限转速。
    /// 计算结果在下一周期发布。
    pub fn velocity_for_distance(&mut self, distance: Meters) -> RadPerSec {
        let min = self.tunables.min_speed_rpm.get();
        let max = self.tunables.max_speed_rpm.get();
        let points = self.tunables.lookup_points().into_iter().map(|(d, s)| (d.0, s.0));

        let rpm = match LookupTable::new(points) {
            Ok(table) => table.lookup_clamped(distance.0, min, max),
            Err(e) => {
                tracing::warn!(error = %e, "invalid shooter lookup table, using minimum speed");
                min.min(max)
            },
        };

        let rpm = Rpm(rpm);
        self.last_calculation = Some((distance, rpm));
        rpm.to_rad_per_sec()
    }

    /// 当前目标速度
    pub fn target_velocity(&self) -> RadPerSec {
        self.target
    }

    /// 最近一次快照
    pub fn inputs(&self) -> &ShooterInputs {
        &self.inputs
    }

    pub fn io(&self) -> &B {
        &self.io
    }
}

impl<B: ShooterIo> Subsystem for Shooter<B> {
    fn name(&self) -> &'static str {
        "Shooter"
    }

    fn periodic(&mut self, sink: &mut dyn TelemetrySink) {
        self.inputs = self.io.update_inputs(&self.inputs);
        sink.process_inputs(InputsRef::Shooter(&self.inputs));

        let measured = self.inputs.flywheel.velocity;
        sink.record_number("Shooter/Current-Flywheel-Speed", measured.0);
        sink.record_number("Shooter/Current-Flywheel-Speed-RPM", measured.to_rpm().0);
        sink.record_number("Shooter/Desired-Flywheel-Speed", self.target.0);
        sink.record_number("Shooter/Desired-Flywheel-Speed-RPM", self.target.to_rpm().0);
        sink.record_bool("Shooter/At-Target-Speed", self.is_at_target_speed());

        if let Some((distance, rpm)) = self.last_calculation.take() {
            sink.record_number("Shooter/CalculatedDistance_meters", distance.0);
            sink.record_number("Shooter/CalculatedSpeed_RPM", rpm.0);
        }
    }

    fn stop(&mut self) {
        self.stop_flywheels();
    }
}
