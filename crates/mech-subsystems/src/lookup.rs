//! 距离 → 飞轮转速查表
//!
//! 有序的 `(x, y)` 点集，查询时线性插值：
//!
//! ```text
//! y = y1 + (y2 - y1) × (x - x1) / (x2 - x1)
//! ```
//!
//! 超出首尾 key 时取边界点的值（不外推），再由调用方给定的 `[min, max]` 限幅。

use crate::error::TableError;

/// 插值查表
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    points: Vec<(f64, f64)>,
}

impl LookupTable {
    /// 构造并按 key 排序
    ///
    /// 拒绝空表、非有限值与重复 key。
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> Result<Self, TableError> {
        let mut points: Vec<(f64, f64)> = points.into_iter().collect();
        if points.is_empty() {
            return Err(TableError::Empty);
        }
        if let Some((index, &(x, y))) =
            points.iter().enumerate().find(|(_, (x, y))| !x.is_finite() || !y.is_finite())
        {
            return Err(TableError::NonFinite { index, x, y });
        }

        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(pair) = points.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(TableError::DuplicateKey(pair[0].0));
        }

        Ok(Self { points })
    }

    /// 点数
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 构造保证非空，恒为 false
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 按 key 升序排列的点
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// 插值查询（超出范围取边界值）
    pub fn lookup(&self, x: f64) -> f64 {
        // 第一个 key >= x 的位置
        let upper = self.points.partition_point(|&(key, _)| key < x);

        match (upper.checked_sub(1).map(|i| self.points[i]), self.points.get(upper)) {
            (_, Some(&(x2, y2))) if x2 == x => y2,
            (Some((x1, y1)), Some(&(x2, y2))) => y1 + (y2 - y1) * (x - x1) / (x2 - x1),
            (Some((_, y1)), None) => y1,
            (None, Some(&(_, y2))) => y2,
            // 非空表不会出现；NaN 查询也落在上面的分支
            (None, None) => 0.0,
        }
    }

    /// 插值后限幅到 `[min, max]`
    ///
    /// `min > max` 时以 `max` 为准。
    pub fn lookup_clamped(&self, x: f64, min: f64, max: f64) -> f64 {
        self.lookup(x).max(min).min(max)
    }
}
