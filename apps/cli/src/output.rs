//! 终端输出

use mech_telemetry::MemorySink;

/// 汇总中显示的派生量前缀（快照字段太多，只显示控制器发布的派生值）
const SUMMARY_KEYS: &[&str] = &[
    "Intake/Current-Pivot-Angle",
    "Intake/Desired-Pivot-Angle",
    "Shooter/Current-Flywheel-Speed-RPM",
    "Shooter/Desired-Flywheel-Speed-RPM",
    "Shooter/At-Target-Speed",
    "Shooter/CalculatedDistance_meters",
    "Shooter/CalculatedSpeed_RPM",
    "Feeder/Desired-Speed",
    "Climber/Desired-Speed",
];

/// 打印最终发布值
pub fn print_summary(title: &str, sink: &MemorySink, verbose: bool) {
    println!("════════════════════════════════════════");
    println!("           {title}");
    println!("════════════════════════════════════════");
    println!("周期数: {}", sink.cycles());
    println!();

    if verbose {
        for (key, value) in sink.latest() {
            println!("  {key:<40} {value}");
        }
    } else {
        for key in SUMMARY_KEYS {
            if let Some(value) = sink.get(key) {
                println!("  {key:<40} {value}");
            }
        }
    }
    println!();
}
