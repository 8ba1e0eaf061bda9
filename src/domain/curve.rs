// ==========================================
// 新店铺货系统 - 尺码曲线领域模型
// ==========================================

use crate::domain::types::{HierarchyKey, Qty};
use serde::{Deserialize, Serialize};

/// 尺码曲线输入行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeCurveEntry {
    pub hierarchy: HierarchyKey,
    pub size: String,
    pub curve_qty: Qty,
}

/// 单个层级的完整曲线（一整套 = total_curve 件）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyCurve {
    pub hierarchy: HierarchyKey,
    pub sizes: Vec<(String, Qty)>, // 按首次出现顺序
    pub total_curve: Qty,
}

impl HierarchyCurve {
    /// 尺码对应的曲线数量；曲线未定义该尺码时返回 None
    pub fn qty_for(&self, size: &str) -> Option<Qty> {
        self.sizes
            .iter()
            .find(|(s, _)| s == size)
            .map(|(_, qty)| *qty)
    }
}
