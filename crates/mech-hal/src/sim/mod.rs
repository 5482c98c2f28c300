//! 仿真后端
//!
//! 每次 `update_inputs` 先让仿真控制器根据当前命令算出输出，再把物理模型
//! 推进一个 `dt`，写回传感器值，最后与 Real 后端一样经 `sample_motor` 采样。
//! 因此 [`SimMotor::withhold`] 注入的读取失败会走完全相同的容错路径。

mod duty;
mod intake;
mod motor;
mod physics;
mod shooter;

use std::time::Duration;

pub use duty::{SimClimberIo, SimFeederIo};
pub use intake::SimIntakeIo;
pub use motor::{MotorCommand, SimDigitalInput, SimMotor, SimSensors};
pub use physics::{ArmDrive, ArmSim, ArmState, FREE_SPEED_RPM, FlywheelSim, RollerSim, STALL_CURRENT};
pub use shooter::SimShooterIo;

/// 默认仿真步长（与 50 Hz 控制循环一致）
pub const SIM_DT: Duration = Duration::from_millis(20);
