//! # Mech Subsystems
//!
//! 子系统控制器：每个控制器独占一个执行器后端，保存期望设定值，
//! 每周期刷新快照并发布遥测。
//!
//! - [`Intake`]：俯仰臂命名位置 + 开环滚轮
//! - [`Shooter`]：飞轮速度闭环、到速判断、距离查表
//! - [`Feeder`] / [`Climber`]：开环占空比
//! - [`ControlLoop`]：固定频率循环，按注册顺序驱动所有子系统
//!
//! 后端在进程启动时选定（Real / Sim / Replay）并注入控制器，之后不再切换。

pub mod climber;
pub mod control_loop;
pub mod error;
pub mod feeder;
pub mod input;
pub mod intake;
pub mod lookup;
pub mod shooter;
pub mod subsystem;

pub use climber::Climber;
pub use control_loop::{ControlLoop, LoopConfig, Tick};
pub use error::{LoopError, TableError};
pub use feeder::Feeder;
pub use input::{JOYSTICK_DEADBAND, deadband};
pub use intake::{Intake, IntakePosition};
pub use lookup::LookupTable;
pub use shooter::{Shooter, within_tolerance};
pub use subsystem::{Subsystem, SubsystemSet};
