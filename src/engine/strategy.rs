// ==========================================
// 新店铺货系统 - 分配策略定义
// ==========================================
// 用途：
// - 同一份输入可按不同分配策略试算，结果互不影响；
// - 策略与款式顺序一起决定结果，二者都写入运行报告以便复现。

use crate::domain::allocation::{AllocationRow, AllocationSkip};
use crate::domain::capacity::DisplayCapacity;
use crate::engine::capacity_filler::CapacityFiller;
use crate::engine::curve_resolver::CurveResolver;
use crate::engine::eligibility::EligiblePool;
use crate::engine::scaled_allocator::ScaledSetAllocator;
use serde::{Deserialize, Serialize};

/// 分配策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// 整套扣减：按款式逐套消耗陈列容量
    SetBased,
    /// 整套放大：按容量可容纳的整套数放大曲线，受仓库库存封顶
    ScaledFullSet,
}

impl AllocationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationPolicy::SetBased => "set_based",
            AllocationPolicy::ScaledFullSet => "scaled_full_set",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            AllocationPolicy::SetBased => "整套扣减",
            AllocationPolicy::ScaledFullSet => "整套放大",
        }
    }

    /// 构造对应的门店分配器
    pub fn allocator(&self) -> Box<dyn StoreAllocator> {
        match self {
            AllocationPolicy::SetBased => Box::new(CapacityFiller::new()),
            AllocationPolicy::ScaledFullSet => Box::new(ScaledSetAllocator::new()),
        }
    }
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        AllocationPolicy::SetBased
    }
}

impl std::fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AllocationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "set_based" | "set-based" | "a" => Ok(AllocationPolicy::SetBased),
            "scaled_full_set" | "scaled-full-set" | "b" => Ok(AllocationPolicy::ScaledFullSet),
            other => Err(format!("未知分配策略: {}", other)),
        }
    }
}

/// 款式处理顺序（决定整套扣减时的容量争用胜负）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleOrder {
    /// 款式主档首次出现顺序
    InputOrder,
    /// 款式编码升序
    StyleId,
}

impl StyleOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleOrder::InputOrder => "input_order",
            StyleOrder::StyleId => "style_id",
        }
    }
}

impl Default for StyleOrder {
    fn default() -> Self {
        StyleOrder::InputOrder
    }
}

impl std::fmt::Display for StyleOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StyleOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "input_order" | "input-order" | "input" => Ok(StyleOrder::InputOrder),
            "style_id" | "style-id" | "style" => Ok(StyleOrder::StyleId),
            other => Err(format!("未知款式顺序: {}", other)),
        }
    }
}

// ==========================================
// StoreAllocation - 单门店分配结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreAllocation {
    pub store: String,
    pub rows: Vec<AllocationRow>,
    pub skipped: Vec<AllocationSkip>,
}

impl StoreAllocation {
    pub fn new(store: &str) -> Self {
        Self {
            store: store.to_string(),
            rows: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

// ==========================================
// Trait: StoreAllocator
// ==========================================
// 门店之间互不共享状态，实现必须只读访问曲线与款式池
pub trait StoreAllocator: Send + Sync {
    /// 分配单个门店
    ///
    /// # 参数
    /// - store: 门店编码
    /// - capacity_rows: 该门店的陈列容量行（输入顺序）
    /// - curves: 尺码曲线
    /// - pool: 准入款式池
    fn allocate_store(
        &self,
        store: &str,
        capacity_rows: &[&DisplayCapacity],
        curves: &CurveResolver,
        pool: &EligiblePool,
    ) -> StoreAllocation;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_policy_from_str() {
        assert_eq!(AllocationPolicy::from_str("set-based").unwrap(), AllocationPolicy::SetBased);
        assert_eq!(
            AllocationPolicy::from_str(" Scaled_Full_Set ").unwrap(),
            AllocationPolicy::ScaledFullSet
        );
        assert!(AllocationPolicy::from_str("greedy").is_err());
    }

    #[test]
    fn test_style_order_from_str() {
        assert_eq!(StyleOrder::from_str("style-id").unwrap(), StyleOrder::StyleId);
        assert_eq!(StyleOrder::default(), StyleOrder::InputOrder);
        assert!(StyleOrder::from_str("random").is_err());
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&AllocationPolicy::ScaledFullSet).unwrap();
        assert_eq!(json, "\"scaled_full_set\"");
    }
}
