// ==========================================
// 新店铺货系统 - 结果汇总
// ==========================================
// 职责: 按门店顺序拼接各门店的分配行与跳过记录
// 红线: 不聚合、不重排
// ==========================================

use crate::domain::allocation::{AllocationRow, AllocationSkip};
use crate::domain::types::Qty;
use crate::engine::strategy::StoreAllocation;

/// 汇总后的输出表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledResult {
    pub rows: Vec<AllocationRow>,
    pub skipped: Vec<AllocationSkip>,
}

impl AssembledResult {
    pub fn allocated_units(&self) -> Qty {
        self.rows
            .iter()
            .fold(0, |acc: Qty, row| acc.saturating_add(row.allocated_qty))
    }
}

pub struct ResultAssembler;

impl ResultAssembler {
    /// 拼接（输入顺序即门店顺序）
    pub fn assemble(stores: Vec<StoreAllocation>) -> AssembledResult {
        let row_count = stores.iter().map(|s| s.rows.len()).sum();
        let mut result = AssembledResult {
            rows: Vec::with_capacity(row_count),
            skipped: Vec::new(),
        };

        for store in stores {
            result.rows.extend(store.rows);
            result.skipped.extend(store.skipped);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::HierarchyKey;

    fn store_with_rows(store: &str, sizes: &[&str]) -> StoreAllocation {
        let key = HierarchyKey::new("D1", "SD1", "C1", "SC1", "MC1");
        let mut allocation = StoreAllocation::new(store);
        for size in sizes {
            allocation
                .rows
                .push(AllocationRow::new(store, &key, "ST1", "E1", size, 2));
        }
        allocation
    }

    #[test]
    fn test_store_major_order_is_preserved() {
        let result = ResultAssembler::assemble(vec![
            store_with_rows("S2", &["L", "M"]),
            store_with_rows("S1", &["S"]),
        ]);

        let got: Vec<(&str, &str)> = result
            .rows
            .iter()
            .map(|r| (r.store.as_str(), r.size.as_str()))
            .collect();
        assert_eq!(got, vec![("S2", "L"), ("S2", "M"), ("S1", "S")]);
        assert_eq!(result.allocated_units(), 6);
    }

    #[test]
    fn test_empty_input() {
        let result = ResultAssembler::assemble(Vec::new());
        assert!(result.rows.is_empty());
        assert_eq!(result.allocated_units(), 0);
    }
}
