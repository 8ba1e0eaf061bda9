// ==========================================
// 新店铺货系统 - 领域类型定义
// ==========================================
// 职责: 层级键、数量类型、数据集标识、原因码
// 红线: 所有跳过/排除必须输出原因码
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 件数（库存/陈列容量/曲线数量/分配数量统一口径）
pub type Qty = u64;

// ==========================================
// 商品层级键 (Dept, SubDept, Class, SubClass, MC)
// ==========================================
// 红线: 所有层级关联必须五段精确匹配
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HierarchyKey {
    pub dept: String,
    pub sub_dept: String,
    pub class: String,
    pub sub_class: String,
    pub mc: String,
}

impl HierarchyKey {
    pub fn new(
        dept: impl Into<String>,
        sub_dept: impl Into<String>,
        class: impl Into<String>,
        sub_class: impl Into<String>,
        mc: impl Into<String>,
    ) -> Self {
        Self {
            dept: dept.into(),
            sub_dept: sub_dept.into(),
            class: class.into(),
            sub_class: sub_class.into(),
            mc: mc.into(),
        }
    }
}

impl fmt::Display for HierarchyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.dept, self.sub_dept, self.class, self.sub_class, self.mc
        )
    }
}

// ==========================================
// 输入数据集
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    DisplayCapacity,
    StyleMaster,
    WarehouseStock,
    SizeCurve,
    StyleSizeMaster,
}

impl Dataset {
    /// 必填列（列名精确匹配）
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Dataset::DisplayCapacity => &[
                "Store",
                "Dept",
                "SubDept",
                "Class",
                "SubClass",
                "MC",
                "DisplayCapacity",
            ],
            Dataset::StyleMaster => &[
                "Style", "EAN", "Dept", "SubDept", "Class", "SubClass", "MC", "Size",
            ],
            Dataset::WarehouseStock => &["EAN", "WH_Qty"],
            Dataset::SizeCurve => &[
                "Dept", "SubDept", "Class", "SubClass", "MC", "Size", "CurveQty",
            ],
            Dataset::StyleSizeMaster => &["Style", "TotalSizes"],
        }
    }

    pub fn all() -> [Dataset; 5] {
        [
            Dataset::DisplayCapacity,
            Dataset::StyleMaster,
            Dataset::WarehouseStock,
            Dataset::SizeCurve,
            Dataset::StyleSizeMaster,
        ]
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::DisplayCapacity => write!(f, "DisplayCapacity"),
            Dataset::StyleMaster => write!(f, "StyleMaster"),
            Dataset::WarehouseStock => write!(f, "WarehouseStock"),
            Dataset::SizeCurve => write!(f, "SizeCurve"),
            Dataset::StyleSizeMaster => write!(f, "StyleSizeMaster"),
        }
    }
}

// ==========================================
// 款式准入状态
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与报告一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityStatus {
    Eligible,          // 尺码齐全度达标
    BelowThreshold,    // 齐全度不足
    TotalSizesZero,    // 声明尺码数为 0
    SizeMasterMissing, // 尺码主档缺失
}

impl EligibilityStatus {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityStatus::Eligible)
    }
}

impl fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityStatus::Eligible => write!(f, "ELIGIBLE"),
            EligibilityStatus::BelowThreshold => write!(f, "BELOW_THRESHOLD"),
            EligibilityStatus::TotalSizesZero => write!(f, "TOTAL_SIZES_ZERO"),
            EligibilityStatus::SizeMasterMissing => write!(f, "SIZE_MASTER_MISSING"),
        }
    }
}

// ==========================================
// 分配跳过原因
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    NoCurve,           // 层级无曲线或曲线合计为 0
    NoEligibleStyles,  // 层级下无准入款式
    CapacityExhausted, // 剩余陈列容量不足一整套
    ZeroCurveMatch,    // 款式尺码与曲线无交集
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCurve => write!(f, "NO_CURVE"),
            SkipReason::NoEligibleStyles => write!(f, "NO_ELIGIBLE_STYLES"),
            SkipReason::CapacityExhausted => write!(f, "CAPACITY_EXHAUSTED"),
            SkipReason::ZeroCurveMatch => write!(f, "ZERO_CURVE_MATCH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_key_display() {
        let key = HierarchyKey::new("D1", "SD1", "C1", "SC1", "MC1");
        assert_eq!(key.to_string(), "D1/SD1/C1/SC1/MC1");
    }

    #[test]
    fn test_required_columns_are_exact() {
        assert_eq!(Dataset::WarehouseStock.required_columns(), &["EAN", "WH_Qty"]);
        assert_eq!(Dataset::DisplayCapacity.required_columns().len(), 7);
        assert_eq!(Dataset::StyleMaster.required_columns().len(), 8);
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(SkipReason::CapacityExhausted.to_string(), "CAPACITY_EXHAUSTED");
        assert_eq!(EligibilityStatus::TotalSizesZero.to_string(), "TOTAL_SIZES_ZERO");
        assert!(!EligibilityStatus::BelowThreshold.is_eligible());
    }
}
