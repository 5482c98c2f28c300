//! # Mech CLI
//!
//! 机构控制命令行：仿真运行、录制、回放与日志查看。
//!
//! ```bash
//! # 仿真运行射击序列并录制
//! mech-cli run --mode sim --cycles 250 --scenario shoot --distance 2.0 --record out.mlog
//!
//! # 用回放后端重新运行控制器
//! mech-cli replay out.mlog
//!
//! # 查看日志元数据
//! mech-cli inspect out.mlog
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

mod commands;
mod output;
mod robot;
mod scenario;

use commands::{InspectCommand, ReplayCommand, RunCommand};

/// Mech CLI - 机构控制命令行工具
#[derive(Parser, Debug)]
#[command(name = "mech-cli")]
#[command(about = "Run, record and replay mechanism control loops", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 运行控制循环与示例序列
    Run {
        #[command(flatten)]
        args: RunCommand,
    },

    /// 用回放后端重新运行录制日志
    Replay {
        #[command(flatten)]
        args: ReplayCommand,
    },

    /// 查看日志元数据
    Inspect {
        #[command(flatten)]
        args: InspectCommand,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Ctrl-C 只设置停止标志，由循环协作退出并停止所有子系统
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("🛑 收到停止信号，正在停止...");
        running_clone.store(false, Ordering::SeqCst);
    })?;

    match cli.command {
        Commands::Run { args } => args.execute(running),
        Commands::Replay { args } => args.execute(running),
        Commands::Inspect { args } => args.execute(),
    }
}
