// ==========================================
// 新店铺货系统 - 整套放大分配引擎
// ==========================================
// 红线: 任一尺码分配量不超过该 EAN 仓库库存
// ==========================================
// 职责: 门店 × 款式，按 MC 汇总陈列容量，计算可容纳整套数并放大曲线
// 口径: 容量按 MC 聚合（比整套扣减更粗），零分配行照常输出
// ==========================================

use crate::domain::allocation::{AllocationRow, AllocationSkip};
use crate::domain::capacity::DisplayCapacity;
use crate::domain::types::{Qty, SkipReason};
use crate::engine::curve_resolver::CurveResolver;
use crate::engine::eligibility::EligiblePool;
use crate::engine::strategy::{StoreAllocation, StoreAllocator};
use tracing::{debug, instrument};

pub struct ScaledSetAllocator {}

impl ScaledSetAllocator {
    pub fn new() -> Self {
        Self {}
    }

    /// 门店在某 MC 下的陈列容量合计
    pub fn capacity_for_mc(capacity_rows: &[&DisplayCapacity], mc: &str) -> Qty {
        capacity_rows
            .iter()
            .filter(|row| row.hierarchy.mc == mc)
            .fold(0, |acc: Qty, row| acc.saturating_add(row.display_capacity))
    }

    /// 可容纳的整套数（向下取整）
    pub fn full_sets(dc_value: Qty, total_curve: Qty) -> Qty {
        if total_curve == 0 {
            return 0;
        }
        dc_value / total_curve
    }

    /// 单尺码分配量 = min(full_sets × CurveQty, WH_Qty)；曲线未定义的尺码为 0
    pub fn allocated_qty(full_sets: Qty, curve_qty: Option<Qty>, wh_qty: Qty) -> Qty {
        match curve_qty {
            Some(qty) => full_sets.saturating_mul(qty).min(wh_qty),
            None => 0,
        }
    }

    /// 分配单个门店 × 款式
    #[instrument(skip_all, fields(store = %store, style = %style))]
    fn allocate_style(
        &self,
        store: &str,
        style: &str,
        capacity_rows: &[&DisplayCapacity],
        curves: &CurveResolver,
        pool: &EligiblePool,
        allocation: &mut StoreAllocation,
    ) {
        let style_rows: Vec<_> = pool.rows_of_style(style).collect();
        let first = match style_rows.first() {
            Some(row) => *row,
            None => return,
        };

        let dc_value = Self::capacity_for_mc(capacity_rows, &first.hierarchy.mc);

        let curve_qtys: Vec<Option<Qty>> = style_rows
            .iter()
            .map(|row| curves.curve_qty(&row.hierarchy, &row.size))
            .collect();
        let total_curve = curve_qtys
            .iter()
            .flatten()
            .fold(0, |acc: Qty, qty| acc.saturating_add(*qty));

        if total_curve == 0 {
            debug!(reason = %SkipReason::ZeroCurveMatch, "款式跳过");
            allocation.skipped.push(AllocationSkip {
                store: store.to_string(),
                hierarchy: first.hierarchy.clone(),
                style: Some(style.to_string()),
                reason: SkipReason::ZeroCurveMatch,
                detail: "款式尺码与曲线无交集或曲线合计为 0".to_string(),
            });
            return;
        }

        let full_sets = Self::full_sets(dc_value, total_curve);
        debug!(dc_value, total_curve, full_sets, "整套数计算完成");

        for (row, curve_qty) in style_rows.iter().zip(curve_qtys) {
            allocation.rows.push(AllocationRow::new(
                store,
                &row.hierarchy,
                &row.style,
                &row.ean,
                &row.size,
                Self::allocated_qty(full_sets, curve_qty, row.wh_qty),
            ));
        }
    }
}

impl StoreAllocator for ScaledSetAllocator {
    fn allocate_store(
        &self,
        store: &str,
        capacity_rows: &[&DisplayCapacity],
        curves: &CurveResolver,
        pool: &EligiblePool,
    ) -> StoreAllocation {
        let mut allocation = StoreAllocation::new(store);
        for style in pool.styles() {
            self.allocate_style(store, style, capacity_rows, curves, pool, &mut allocation);
        }
        allocation
    }
}

impl Default for ScaledSetAllocator {
    fn default() -> Self {
        Self::new()
    }
}
