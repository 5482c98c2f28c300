//! 主从电机组
//!
//! 从电机不接受独立命令：每条命令先发给主电机，再乘以固定符号发给从电机。

use crate::error::MotorError;
use crate::motor::{ControlType, MotorConfig, MotorController};

/// 从电机相对主电机的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerSign {
    /// 同向
    Aligned,
    /// 反向
    Opposed,
}

impl FollowerSign {
    /// 由“是否反向”标志构造
    pub fn from_opposed(opposed: bool) -> Self {
        if opposed { Self::Opposed } else { Self::Aligned }
    }

    /// 符号系数（+1 / -1）
    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            Self::Aligned => 1.0,
            Self::Opposed => -1.0,
        }
    }

    /// 将主电机命令值映射为从电机命令值
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        value * self.factor()
    }
}

/// 主从电机组
#[derive(Debug)]
pub struct LeaderFollower<M> {
    leader: M,
    follower: M,
    sign: FollowerSign,
}

impl<M: MotorController> LeaderFollower<M> {
    /// 组合主、从电机
    pub fn new(leader: M, follower: M, sign: FollowerSign) -> Self {
        Self { leader, follower, sign }
    }

    /// 主电机（只读）
    pub fn leader(&self) -> &M {
        &self.leader
    }

    /// 从电机（只读）
    pub fn follower(&self) -> &M {
        &self.follower
    }

    /// 符号关系
    pub fn sign(&self) -> FollowerSign {
        self.sign
    }

    /// 配置主电机
    pub fn configure_leader(&mut self, config: &MotorConfig) -> Result<(), MotorError> {
        self.leader.configure(config)
    }

    /// 配置从电机
    pub fn configure_follower(&mut self, config: &MotorConfig) -> Result<(), MotorError> {
        self.follower.configure(config)
    }

    /// 闭环参考值
    pub fn set_reference(&mut self, value: f64, control: ControlType) -> Result<(), MotorError> {
        let leader = self.leader.set_reference(value, control);
        let follower = self.follower.set_reference(self.sign.apply(value), control);
        leader.and(follower)
    }

    /// 开环占空比
    pub fn set_duty_cycle(&mut self, duty: f64) -> Result<(), MotorError> {
        let leader = self.leader.set_duty_cycle(duty);
        let follower = self.follower.set_duty_cycle(self.sign.apply(duty));
        leader.and(follower)
    }

    /// 清零/设置积分累加器
    pub fn set_integral_accumulator(&mut self, value: f64) -> Result<(), MotorError> {
        let leader = self.leader.set_integral_accumulator(value);
        let follower = self.follower.set_integral_accumulator(self.sign.apply(value));
        leader.and(follower)
    }

    /// 停止两台电机
    pub fn stop_motor(&mut self) {
        self.leader.stop_motor();
        self.follower.stop_motor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_factor() {
        assert_eq!(FollowerSign::Aligned.apply(0.4), 0.4);
        assert_eq!(FollowerSign::Opposed.apply(0.4), -0.4);
        assert_eq!(FollowerSign::from_opposed(true), FollowerSign::Opposed);
    }
}
