//! 容错采样
//!
//! 每个信号独立读取。某个信号读取失败时保留上一周期的值，其它字段正常更新。

use crate::error::MotorError;
use crate::inputs::MotorInputs;
use crate::motor::{EncoderConversion, MotorController};
use mech_units::{Amps, Celsius, Volts};

/// 读取一台电机的全部传感量
pub fn sample_motor<M>(motor: &M, conversion: &EncoderConversion, previous: &MotorInputs) -> MotorInputs
where
    M: MotorController + ?Sized,
{
    let voltage = match (motor.applied_output(), motor.bus_voltage()) {
        (Ok(output), Ok(bus)) => Volts(output * bus),
        (Err(e), _) | (_, Err(e)) => retain("voltage", e, previous.voltage),
    };

    MotorInputs {
        temperature: motor
            .temperature()
            .map(Celsius)
            .unwrap_or_else(|e| retain("temperature", e, previous.temperature)),
        voltage,
        current: motor
            .output_current()
            .map(Amps)
            .unwrap_or_else(|e| retain("current", e, previous.current)),
        position: motor
            .position()
            .map(|rotations| conversion.position(rotations))
            .unwrap_or_else(|e| retain("position", e, previous.position)),
        velocity: motor
            .velocity()
            .map(|rpm| conversion.velocity(rpm))
            .unwrap_or_else(|e| retain("velocity", e, previous.velocity)),
    }
}

/// 读取失败，沿用旧值
pub(crate) fn retain<T>(field: &'static str, error: MotorError, previous: T) -> T {
    tracing::debug!(field, error = %error, "sensor read failed, retaining previous value");
    previous
}
