//! 摇杆输入处理

/// 摇杆死区（默认宽度）
pub const JOYSTICK_DEADBAND: f64 = 0.1;

/// 死区处理
///
/// `|value| < band` 时输出 0；死区外重新缩放，使输出在死区边缘从 0 连续增长到 ±1。
///
/// ```rust
/// use mech_subsystems::deadband;
///
/// assert_eq!(deadband(0.05, 0.1), 0.0);
/// assert_eq!(deadband(1.0, 0.1), 1.0);
/// assert!((deadband(0.55, 0.1) - 0.5).abs() < 1e-12);
/// ```
pub fn deadband(value: f64, band: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let band = band.abs();
    if band >= 1.0 {
        return 0.0;
    }
    if value.abs() < band {
        return 0.0;
    }
    let scaled = (value.abs() - band) / (1.0 - band);
    (scaled * value.signum()).clamp(-1.0, 1.0)
}
