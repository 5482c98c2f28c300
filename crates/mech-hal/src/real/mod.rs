//! 真实硬件后端
//!
//! 对 [`MotorController`](crate::MotorController) 与
//! [`DigitalInput`](crate::DigitalInput) 泛型，不绑定具体驱动。
//! 构造时用 [`try_until_ok`](crate::try_until_ok) 写入配置，失败不会 panic。

mod duty;
mod intake;
mod shooter;

pub use duty::{RealClimberIo, RealFeederIo};
pub use intake::RealIntakeIo;
pub use shooter::RealShooterIo;
