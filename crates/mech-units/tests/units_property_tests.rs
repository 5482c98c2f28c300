//! 单位类型的属性测试
//!
//! 使用 proptest 验证数学属性。

use mech_units::{Deg, DutyCycle, Rad, RadPerSec, Rpm};
use proptest::prelude::*;

proptest! {
    /// 测试弧度到角度的往返转换
    #[test]
    fn rad_deg_roundtrip(rad in -100.0..100.0f64) {
        let r = Rad(rad);
        let r2 = r.to_deg().to_rad();
        prop_assert!((r.0 - r2.0).abs() < 1e-10);
    }

    /// 测试 rad/s 与 RPM 的往返转换
    #[test]
    fn rad_per_sec_rpm_roundtrip(speed in -1000.0..1000.0f64) {
        let s = RadPerSec(speed);
        let s2 = s.to_rpm().to_rad_per_sec();
        prop_assert!((s.0 - s2.0).abs() < 1e-9);
    }

    /// 测试 RPM 换算比例
    #[test]
    fn rpm_scale(rpm in 0.0..10_000.0f64) {
        let s = Rpm(rpm).to_rad_per_sec();
        prop_assert!((s.0 - rpm * std::f64::consts::TAU / 60.0).abs() < 1e-9);
    }

    /// 测试圈数往返转换
    #[test]
    fn rotations_roundtrip(rotations in -50.0..50.0f64) {
        let r = Rad::from_rotations(rotations);
        prop_assert!((r.to_rotations() - rotations).abs() < 1e-10);
    }

    /// 测试钳位结果总在区间内
    #[test]
    fn clamp_in_bounds(value in -1000.0..1000.0f64, lo in -100.0..0.0f64, hi in 0.0..100.0f64) {
        let c = Deg(value).clamp(Deg(lo), Deg(hi));
        prop_assert!(c.0 >= lo && c.0 <= hi);
    }

    /// 测试占空比总在 [-1, 1]
    #[test]
    fn duty_cycle_saturates(value in -100.0..100.0f64) {
        let d = DutyCycle::new(value).value();
        prop_assert!((-1.0..=1.0).contains(&d));
    }
}

#[test]
fn serde_is_transparent() {
    let json = serde_json::to_string(&Rad(1.5)).unwrap();
    assert_eq!(json, "1.5");
    let back: Rpm = serde_json::from_str("1500.0").unwrap();
    assert_eq!(back, Rpm(1500.0));
}
