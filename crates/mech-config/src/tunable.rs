//! 可在线修改的数值
//!
//! `TunableNumber` 是一个可廉价克隆的句柄，所有持有者共享同一个原子存储。
//! 任何一处 `set()` 之后，其它持有者下一次 `get()` 立即看到新值。
//!
//! # 示例
//!
//! ```rust
//! use mech_config::TunableStore;
//!
//! let store = TunableStore::new();
//! let pickup = store.number("Intake/Position/Pickup", 50.0);
//!
//! // 另一处（如调参面板）修改同一个 key
//! store.number("Intake/Position/Pickup", 0.0).set(65.0);
//! assert_eq!(pickup.get(), 65.0);
//! ```

use crate::error::ConfigError;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 可调数值句柄
#[derive(Clone)]
pub struct TunableNumber {
    key: Arc<str>,
    bits: Arc<AtomicU64>,
}

impl TunableNumber {
    /// 创建独立的可调数值（不注册到任何 store）
    pub fn new(key: impl Into<Arc<str>>, default: f64) -> Self {
        Self {
            key: key.into(),
            bits: Arc::new(AtomicU64::new(default.to_bits())),
        }
    }

    /// 当前生效值
    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// 修改值（对所有持有者立即生效）
    #[inline]
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// 层级名称，如 `"Shooter/Lookup/Distance1_meters"`
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for TunableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TunableNumber")
            .field("key", &self.key)
            .field("value", &self.get())
            .finish()
    }
}

/// 可调参数注册表
///
/// 以层级名称为 key。同一个 key 只会注册一次，之后返回共享的句柄。
#[derive(Debug, Default)]
pub struct TunableStore {
    entries: RwLock<BTreeMap<String, TunableNumber>>,
}

impl TunableStore {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取或注册可调数值
    ///
    /// 若 key 已存在，返回已有句柄并忽略 `default`。
    pub fn number(&self, key: &str, default: f64) -> TunableNumber {
        if let Some(existing) = self.entries.read().get(key) {
            return existing.clone();
        }

        let mut entries = self.entries.write();
        entries
            .entry(key.to_string())
            .or_insert_with(|| TunableNumber::new(key, default))
            .clone()
    }

    /// 查找已注册的可调数值
    pub fn get(&self, key: &str) -> Option<TunableNumber> {
        self.entries.read().get(key).cloned()
    }

    /// 修改已注册的值
    pub fn set(&self, key: &str, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(ConfigError::invalid(key, format!("{value} is not finite")));
        }
        match self.entries.read().get(key) {
            Some(number) => {
                number.set(value);
                tracing::debug!(key, value, "tunable updated");
                Ok(())
            },
            None => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    /// 批量覆盖
    ///
    /// 遇到第一个未知 key 或非法值即返回错误，之前的修改保留。
    pub fn apply_overrides<'a, I>(&self, overrides: I) -> Result<usize, ConfigError>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        let mut applied = 0;
        for (key, value) in overrides {
            self.set(key, *value)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// 当前所有 key/value（按 key 排序）
    pub fn snapshot(&self) -> Vec<(String, f64)> {
        self.entries.read().iter().map(|(k, v)| (k.clone(), v.get())).collect()
    }

    /// 已注册数量
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_handle() {
        let store = TunableStore::new();
        let a = store.number("Shooter/FLYWHEEL_SPEED", 1500.0);
        let b = store.number("Shooter/FLYWHEEL_SPEED", 0.0);

        assert_eq!(b.get(), 1500.0);
        b.set(1800.0);
        assert_eq!(a.get(), 1800.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_unknown_key() {
        let store = TunableStore::new();
        let err = store.set("Nope", 1.0).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn test_set_rejects_nan() {
        let store = TunableStore::new();
        store.number("Intake/Position/Pickup", 50.0);
        assert!(store.set("Intake/Position/Pickup", f64::NAN).is_err());
        assert_eq!(store.get("Intake/Position/Pickup").unwrap().get(), 50.0);
    }

    #[test]
    fn test_apply_overrides() {
        let store = TunableStore::new();
        store.number("A", 1.0);
        store.number("B", 2.0);

        let overrides: BTreeMap<String, f64> =
            [("A".to_string(), 10.0), ("B".to_string(), 20.0)].into_iter().collect();
        assert_eq!(store.apply_overrides(&overrides).unwrap(), 2);
        assert_eq!(store.snapshot(), vec![("A".to_string(), 10.0), ("B".to_string(), 20.0)]);
    }

    #[test]
    fn test_debug_shows_value() {
        let n = TunableNumber::new("X", 0.5);
        assert!(format!("{n:?}").contains("0.5"));
    }
}
