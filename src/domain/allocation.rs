// ==========================================
// 新店铺货系统 - 分配结果领域模型
// ==========================================
// 红线: 分配行只生成、不修改
// ==========================================

use crate::domain::types::{HierarchyKey, Qty, SkipReason};
use serde::{Deserialize, Serialize};

// ==========================================
// AllocationRow - 分配结果行（输出表）
// ==========================================
// 列名与导出文件表头一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRow {
    #[serde(rename = "Store")]
    pub store: String,
    #[serde(rename = "Dept")]
    pub dept: String,
    #[serde(rename = "SubDept")]
    pub sub_dept: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "SubClass")]
    pub sub_class: String,
    #[serde(rename = "MC")]
    pub mc: String,
    #[serde(rename = "Style")]
    pub style: String,
    #[serde(rename = "EAN")]
    pub ean: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "AllocatedQty")]
    pub allocated_qty: Qty,
}

impl AllocationRow {
    pub fn new(
        store: &str,
        hierarchy: &HierarchyKey,
        style: &str,
        ean: &str,
        size: &str,
        allocated_qty: Qty,
    ) -> Self {
        Self {
            store: store.to_string(),
            dept: hierarchy.dept.clone(),
            sub_dept: hierarchy.sub_dept.clone(),
            class: hierarchy.class.clone(),
            sub_class: hierarchy.sub_class.clone(),
            mc: hierarchy.mc.clone(),
            style: style.to_string(),
            ean: ean.to_string(),
            size: size.to_string(),
            allocated_qty,
        }
    }

    pub fn hierarchy(&self) -> HierarchyKey {
        HierarchyKey::new(
            self.dept.as_str(),
            self.sub_dept.as_str(),
            self.class.as_str(),
            self.sub_class.as_str(),
            self.mc.as_str(),
        )
    }
}

// ==========================================
// AllocationSkip - 跳过记录（可解释性）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSkip {
    pub store: String,
    pub hierarchy: HierarchyKey,
    pub style: Option<String>, // None: 整个层级被跳过
    pub reason: SkipReason,
    pub detail: String,
}
