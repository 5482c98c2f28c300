//! 测试公共设施

#![allow(dead_code)]

pub mod mock_motor;
