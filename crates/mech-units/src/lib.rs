//! # Mech Units - 强类型物理量
//!
//! 使用 NewType 模式防止单位混淆，在编译期保证类型安全。
//!
//! # 设计目标
//!
//! - **编译期类型安全**: 防止 `Rad` 与 `Deg`、`RadPerSec` 与 `Rpm` 混用
//! - **零开销抽象**: NewType 编译后与 `f64` 性能相同
//! - **边界强类型**: 硬件抽象层的输入输出永远不出现裸 `f64`
//!
//! # 示例
//!
//! ```rust
//! use mech_units::{Rad, Deg, RadPerSec, Rpm};
//!
//! let angle = Deg(90.0).to_rad();
//! assert!((angle.0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
//!
//! let speed = Rpm(60.0).to_rad_per_sec();
//! assert!((speed.0 - std::f64::consts::TAU).abs() < 1e-12);
//!
//! // 类型安全：以下代码无法编译
//! // let _ = Rad(1.0) + Deg(1.0);
//! ```

#[macro_use]
mod macros;

mod angle;
mod duty;
mod electrical;
mod length;
mod thermal;
mod velocity;

pub use angle::{Deg, Rad};
pub use duty::DutyCycle;
pub use electrical::{Amps, Volts};
pub use length::Meters;
pub use thermal::Celsius;
pub use velocity::{RadPerSec, Rpm};
