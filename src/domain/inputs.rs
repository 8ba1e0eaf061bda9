// ==========================================
// 新店铺货系统 - 单次运行输入快照
// ==========================================
// 红线: 一次运行只加载一次，运行中不更新
// ==========================================

use crate::domain::capacity::DisplayCapacity;
use crate::domain::curve::SizeCurveEntry;
use crate::domain::style::{SizeMasterEntry, StyleMasterEntry, WarehouseStock};
use serde::{Deserialize, Serialize};

/// 五张输入表（已完成列校验与类型转换）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationInputs {
    pub display_capacity: Vec<DisplayCapacity>,
    pub style_master: Vec<StyleMasterEntry>,
    pub warehouse_stock: Vec<WarehouseStock>,
    pub size_curve: Vec<SizeCurveEntry>,
    pub size_master: Vec<SizeMasterEntry>,
}

impl AllocationInputs {
    pub fn total_rows(&self) -> usize {
        self.display_capacity.len()
            + self.style_master.len()
            + self.warehouse_stock.len()
            + self.size_curve.len()
            + self.size_master.len()
    }

    /// 门店列表（按陈列容量表首次出现顺序）
    pub fn stores(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.display_capacity
            .iter()
            .filter(|row| seen.insert(row.store.as_str()))
            .map(|row| row.store.clone())
            .collect()
    }
}
