// ==========================================
// 新店铺货系统 - 款式领域模型
// ==========================================
// 职责: 款式主档 / 尺码主档 / 仓库库存 / 款式库存行
// 红线: 每个 EAN 只属于一个款式、一个层级
// ==========================================

use crate::domain::types::{EligibilityStatus, HierarchyKey, Qty};
use serde::{Deserialize, Serialize};

// ==========================================
// SizeMasterEntry - 款式尺码主档
// ==========================================
// 用途: 齐全度分母（声明尺码数，而非库存中出现的尺码数）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeMasterEntry {
    pub style: String,
    pub total_sizes: u32,
}

// ==========================================
// StyleMasterEntry - 款式主档（一行一个 EAN）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleMasterEntry {
    pub style: String,
    pub ean: String,
    pub hierarchy: HierarchyKey,
    pub size: String,
}

// ==========================================
// WarehouseStock - 仓库库存（一行一个 EAN）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseStock {
    pub ean: String,
    pub wh_qty: Qty,
}

// ==========================================
// StyleStockRow - 款式主档 + 仓库库存
// ==========================================
// 用途: Stock Joiner 输出，准入判定与分配的共同输入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleStockRow {
    pub style: String,
    pub ean: String,
    pub hierarchy: HierarchyKey,
    pub size: String,
    pub wh_qty: Qty,
    pub size_available: bool, // wh_qty > 0
}

// ==========================================
// StyleAvailability - 款式尺码齐全度
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleAvailability {
    pub style: String,
    pub available_sizes: u32,
    pub total_sizes: Option<u32>,      // None: 尺码主档缺失
    pub availability_pct: Option<f64>, // None: 分母缺失或为 0
    pub status: EligibilityStatus,
}

impl StyleAvailability {
    pub fn is_eligible(&self) -> bool {
        self.status.is_eligible()
    }
}
