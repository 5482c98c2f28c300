//! # Mech HAL - 执行器硬件抽象层
//!
//! 把控制逻辑与具体电机控制器解耦。同一份控制代码可以运行在：
//!
//! - **Real**：真实电机控制器（对 [`MotorController`] 泛型）
//! - **Sim**：物理仿真（[`sim`]）
//! - **Replay**：录制日志回放（[`replay::ReplayIo`]）
//!
//! ## 分层
//!
//! ```text
//! MotorController / DigitalInput   原始单位，单信号独立失败
//!        │ sample_motor / try_until_ok / LeaderFollower / PivotGeometry
//!        ▼
//! IntakeIo / ShooterIo / FeederIo / ClimberIo   物理单位，从不返回错误
//! ```
//!
//! ## 容错语义
//!
//! - 启动配置失败：最多重试 [`CONFIGURE_ATTEMPTS`] 次，之后以部分配置状态继续运行
//! - 单个信号读取失败：该字段沿用上一周期快照的值，其它字段正常更新
//! - 命令写入失败：记录 `warn!`，执行器保持上一条命令

pub mod error;
pub mod follower;
pub mod geometry;
pub mod inputs;
pub mod io;
pub mod motor;
pub mod presets;
pub mod real;
pub mod replay;
pub mod sim;

mod configure;
mod sample;

pub use configure::{CONFIGURE_ATTEMPTS, try_until_ok};
pub use error::{MotorError, Signal};
pub use follower::{FollowerSign, LeaderFollower};
pub use geometry::PivotGeometry;
pub use inputs::{ClimberInputs, FeederInputs, IntakeInputs, MotorInputs, ShooterInputs};
pub use io::{
    ActuatorIo, ClimberIo, DynClimberIo, DynFeederIo, DynIntakeIo, DynShooterIo, FeederIo,
    IntakeIo, ShooterIo,
};
pub use motor::{
    ControlType, DigitalInput, EncoderConversion, IdleMode, MotorConfig, MotorController,
    PidfGains,
};
pub use replay::ReplayIo;
pub use sample::sample_motor;
