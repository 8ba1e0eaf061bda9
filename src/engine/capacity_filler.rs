// ==========================================
// 新店铺货系统 - 陈列容量填充引擎（整套扣减）
// ==========================================
// 红线: 陈列容量只按整套曲线扣减，不允许半套、不允许透支
// 红线: 曲线未定义的尺码永不分配
// ==========================================
// 职责: 门店 × 层级的陈列容量按整套曲线逐款消耗
// 输入: 陈列容量行 + 尺码曲线 + 准入款式池
// 输出: AllocationRow（每款一整套） + 跳过记录
// ==========================================

use crate::domain::allocation::{AllocationRow, AllocationSkip};
use crate::domain::capacity::{CapacityBudget, CapacityConstraint, DisplayCapacity};
use crate::domain::curve::HierarchyCurve;
use crate::domain::types::SkipReason;
use crate::engine::curve_resolver::CurveResolver;
use crate::engine::eligibility::EligiblePool;
use crate::engine::strategy::{StoreAllocation, StoreAllocator};
use tracing::{debug, instrument};

// ==========================================
// CapacityFiller - 陈列容量填充引擎
// ==========================================
pub struct CapacityFiller {
    // 无状态引擎，不需要注入依赖
}

/// 单个门店 × 层级的填充结果
#[derive(Debug, Clone, Default)]
pub struct FillHierarchyResult {
    pub rows: Vec<AllocationRow>,
    pub skipped: Vec<AllocationSkip>,
    pub sets_allocated: usize,
}

impl CapacityFiller {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 填充单个门店 × 层级
    ///
    /// 规则：
    /// 1) 款式按款式池顺序处理
    /// 2) remaining_capacity < total_curve 即停止（严格小于）
    /// 3) 每款分配一整套：曲线内尺码 AllocatedQty = CurveQty
    /// 4) 无论匹配到几个尺码，都扣减一整套 total_curve
    ///
    /// # 参数
    /// - `budget`: 容量预算（会被修改）
    /// - `curve`: 该层级的尺码曲线
    /// - `pool`: 准入款式池
    ///
    /// # 返回
    /// 分配行 + 跳过记录
    #[instrument(skip(self, budget, curve, pool), fields(
        store = %budget.store,
        hierarchy = %budget.hierarchy,
        capacity = budget.initial_capacity,
        total_curve = curve.total_curve
    ))]
    pub fn fill_hierarchy(
        &self,
        budget: &mut CapacityBudget,
        curve: &HierarchyCurve,
        pool: &EligiblePool,
    ) -> FillHierarchyResult {
        let mut result = FillHierarchyResult::default();
        let styles = pool.styles_in(&budget.hierarchy);

        if styles.is_empty() {
            result.skipped.push(self.skip(
                budget,
                None,
                SkipReason::NoEligibleStyles,
                "该层级下无准入款式".to_string(),
            ));
            return result;
        }

        for (idx, style) in styles.iter().enumerate() {
            if !budget.take_set(curve.total_curve) {
                // 剩余款式全部记录为容量耗尽
                for rest in &styles[idx..] {
                    result.skipped.push(self.skip(
                        budget,
                        Some(rest),
                        SkipReason::CapacityExhausted,
                        format!(
                            "CAPACITY_EXHAUSTED: remaining={} < total_curve={}",
                            budget.remaining_capacity, curve.total_curve
                        ),
                    ));
                }
                break;
            }

            let rows = self.curve_set_rows(&budget.store, style, curve, pool);
            if rows.is_empty() {
                result.skipped.push(self.skip(
                    budget,
                    Some(style),
                    SkipReason::ZeroCurveMatch,
                    "款式尺码与曲线无交集，仍扣减一整套".to_string(),
                ));
            }
            result.rows.extend(rows);
            result.sets_allocated += 1;
        }

        debug!(
            sets_allocated = result.sets_allocated,
            remaining = budget.remaining_capacity,
            rows = result.rows.len(),
            "层级填充完成"
        );

        result
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 一整套曲线对应的分配行（仅曲线内尺码）
    fn curve_set_rows(
        &self,
        store: &str,
        style: &str,
        curve: &HierarchyCurve,
        pool: &EligiblePool,
    ) -> Vec<AllocationRow> {
        pool.rows_for(style, &curve.hierarchy)
            .filter_map(|row| {
                curve.qty_for(&row.size).map(|qty| {
                    AllocationRow::new(store, &row.hierarchy, &row.style, &row.ean, &row.size, qty)
                })
            })
            .collect()
    }

    fn skip(
        &self,
        budget: &CapacityBudget,
        style: Option<&String>,
        reason: SkipReason,
        detail: String,
    ) -> AllocationSkip {
        debug!(
            store = %budget.store,
            hierarchy = %budget.hierarchy,
            style = ?style,
            %reason,
            "跳过"
        );
        AllocationSkip {
            store: budget.store.clone(),
            hierarchy: budget.hierarchy.clone(),
            style: style.cloned(),
            reason,
            detail,
        }
    }
}

impl StoreAllocator for CapacityFiller {
    /// 门店的每个陈列容量行独立填充（重复行各自拥有预算）
    fn allocate_store(
        &self,
        store: &str,
        capacity_rows: &[&DisplayCapacity],
        curves: &CurveResolver,
        pool: &EligiblePool,
    ) -> StoreAllocation {
        let mut allocation = StoreAllocation::new(store);

        for capacity in capacity_rows {
            let mut budget = CapacityBudget::from_row(capacity);

            let curve = match curves.resolve(&budget.hierarchy) {
                Some(curve) => curve,
                None => {
                    allocation.skipped.push(self.skip(
                        &budget,
                        None,
                        SkipReason::NoCurve,
                        "层级未定义尺码曲线或曲线合计为 0".to_string(),
                    ));
                    continue;
                }
            };

            let filled = self.fill_hierarchy(&mut budget, curve, pool);
            allocation.rows.extend(filled.rows);
            allocation.skipped.extend(filled.skipped);
        }

        allocation
    }
}

impl Default for CapacityFiller {
    fn default() -> Self {
        Self::new()
    }
}
