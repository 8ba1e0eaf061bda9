// ==========================================
// 新店铺货系统 - 陈列容量领域模型
// ==========================================
// 红线: 陈列容量只按整套曲线扣减，不允许半套/透支
// ==========================================

use crate::domain::types::{HierarchyKey, Qty};
use serde::{Deserialize, Serialize};

// ==========================================
// DisplayCapacity - 门店 × 层级陈列容量（输入）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCapacity {
    pub store: String,
    pub hierarchy: HierarchyKey,
    pub display_capacity: Qty,
}

// ==========================================
// CapacityBudget - 单次门店 × 层级分配内的容量预算
// ==========================================
// 用途: 分配引擎唯一的可变量，作用域为一次层级循环
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityBudget {
    pub store: String,
    pub hierarchy: HierarchyKey,
    pub initial_capacity: Qty,
    pub remaining_capacity: Qty,
}

impl CapacityBudget {
    pub fn from_row(row: &DisplayCapacity) -> Self {
        Self {
            store: row.store.clone(),
            hierarchy: row.hierarchy.clone(),
            initial_capacity: row.display_capacity,
            remaining_capacity: row.display_capacity,
        }
    }
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
// 用途: 整套扣减的约束检查接口
pub trait CapacityConstraint {
    /// 剩余容量是否还能容纳一整套曲线
    fn can_take_set(&self, total_curve: Qty) -> bool;

    /// 扣减一整套曲线；容量不足时返回 false 且不扣减
    fn take_set(&mut self, total_curve: Qty) -> bool;

    /// 已消耗容量
    fn used_capacity(&self) -> Qty;
}

impl CapacityConstraint for CapacityBudget {
    /// 截断条件为严格小于：remaining == total_curve 仍可分配一套
    fn can_take_set(&self, total_curve: Qty) -> bool {
        self.remaining_capacity >= total_curve
    }

    fn take_set(&mut self, total_curve: Qty) -> bool {
        if !self.can_take_set(total_curve) {
            return false;
        }
        self.remaining_capacity -= total_curve;
        true
    }

    fn used_capacity(&self) -> Qty {
        self.initial_capacity - self.remaining_capacity
    }
}
