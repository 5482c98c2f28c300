//! 命令定义和实现

pub mod inspect;
pub mod replay;
pub mod run;

pub use inspect::InspectCommand;
pub use replay::ReplayCommand;
pub use run::RunCommand;
