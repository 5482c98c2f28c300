//! # Mech Config - 配置层
//!
//! 所有可调参数（增益、限位、查表点、容差、命名位置角度）都存放在可在线修改的
//! [`TunableStore`] 中，控制器在使用点读取当前值，不在构造时缓存。
//! 硬件常量（CAN ID、电流限制、反转标志、齿轮比）在构造时一次性读取。
//!
//! ## 模块
//!
//! - `tunable` - 可在线修改的数值与注册表
//! - `intake` / `shooter` / `feeder` / `climber` - 各子系统常量
//! - `robot` - 整车配置聚合与 TOML 加载

pub mod climber;
pub mod error;
pub mod feeder;
pub mod intake;
pub mod robot;
pub mod shooter;
pub mod tunable;

pub use climber::ClimberConstants;
pub use error::ConfigError;
pub use feeder::FeederConstants;
pub use intake::{IntakeConfig, IntakeConstants, IntakeTunables};
pub use robot::{HardwareIds, LoopSettings, RobotConfig};
pub use shooter::{LookupPoint, ShooterConfig, ShooterConstants, ShooterTunables};
pub use tunable::{TunableNumber, TunableStore};
