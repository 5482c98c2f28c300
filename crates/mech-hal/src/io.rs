//! 执行器后端接口
//!
//! 每个机构族一个 trait，三种实现（Real / Sim / Replay）在进程启动时选定，
//! 注入到对应的子系统控制器中，运行期不再切换。
//!
//! 所有方法都不返回错误：后端在最底层吸收故障（保留旧值、记录日志），
//! 控制器只通过遥测中的陈旧值感知故障。

use crate::inputs::{ClimberInputs, FeederInputs, IntakeInputs, ShooterInputs};
use mech_units::{DutyCycle, Rad, RadPerSec};

/// 所有后端共有的输入采集
pub trait ActuatorIo {
    /// 快照类型
    type Inputs: Copy + Default;

    /// 采集本周期快照
    ///
    /// `previous` 为上一周期的快照，某字段读取失败时沿用其值。
    /// 不得阻塞。
    fn update_inputs(&mut self, previous: &Self::Inputs) -> Self::Inputs;
}

/// 进气臂后端
pub trait IntakeIo: ActuatorIo<Inputs = IntakeInputs> {
    /// 俯仰位置目标（编码器坐标）
    fn set_pivot_target(&mut self, encoder_angle: Rad);

    /// 俯仰开环输出
    fn set_pivot_duty_cycle(&mut self, duty: DutyCycle);

    /// 滚轮开环输出
    fn set_roller_duty_cycle(&mut self, duty: DutyCycle);
}

/// 射手后端
pub trait ShooterIo: ActuatorIo<Inputs = ShooterInputs> {
    /// 飞轮速度闭环目标
    fn set_flywheel_velocity(&mut self, velocity: RadPerSec);

    /// 飞轮开环输出
    fn set_flywheel_duty_cycle(&mut self, duty: DutyCycle);

    /// 清除积分累加器后停止飞轮
    fn stop_flywheel(&mut self);
}

/// 送料器后端
pub trait FeederIo: ActuatorIo<Inputs = FeederInputs> {
    /// 开环输出
    fn set_duty_cycle(&mut self, duty: DutyCycle);
}

/// 爬升机构后端
pub trait ClimberIo: ActuatorIo<Inputs = ClimberInputs> {
    /// 开环输出
    fn set_duty_cycle(&mut self, duty: DutyCycle);
}

/// 动态分发的进气臂后端
pub type DynIntakeIo = dyn IntakeIo<Inputs = IntakeInputs>;
/// 动态分发的射手后端
pub type DynShooterIo = dyn ShooterIo<Inputs = ShooterInputs>;
/// 动态分发的送料器后端
pub type DynFeederIo = dyn FeederIo<Inputs = FeederInputs>;
/// 动态分发的爬升机构后端
pub type DynClimberIo = dyn ClimberIo<Inputs = ClimberInputs>;

impl<T: ActuatorIo + ?Sized> ActuatorIo for Box<T> {
    type Inputs = T::Inputs;

    fn update_inputs(&mut self, previous: &Self::Inputs) -> Self::Inputs {
        (**self).update_inputs(previous)
    }
}

impl<T: IntakeIo + ?Sized> IntakeIo for Box<T> {
    fn set_pivot_target(&mut self, encoder_angle: Rad) {
        (**self).set_pivot_target(encoder_angle)
    }

    fn set_pivot_duty_cycle(&mut self, duty: DutyCycle) {
        (**self).set_pivot_duty_cycle(duty)
    }

    fn set_roller_duty_cycle(&mut self, duty: DutyCycle) {
        (**self).set_roller_duty_cycle(duty)
    }
}

impl<T: ShooterIo + ?Sized> ShooterIo for Box<T> {
    fn set_flywheel_velocity(&mut self, velocity: RadPerSec) {
        (**self).set_flywheel_velocity(velocity)
    }

    fn set_flywheel_duty_cycle(&mut self, duty: DutyCycle) {
        (**self).set_flywheel_duty_cycle(duty)
    }

    fn stop_flywheel(&mut self) {
        (**self).stop_flywheel()
    }
}

impl<T: FeederIo + ?Sized> FeederIo for Box<T> {
    fn set_duty_cycle(&mut self, duty: DutyCycle) {
        (**self).set_duty_cycle(duty)
    }
}

impl<T: ClimberIo + ?Sized> ClimberIo for Box<T> {
    fn set_duty_cycle(&mut self, duty: DutyCycle) {
        (**self).set_duty_cycle(duty)
    }
}
