// ==========================================
// 新店铺货系统 - 库存关联引擎
// ==========================================
// 职责: 款式主档 LEFT JOIN 仓库库存 (on EAN)
// 口径: 无库存记录的 EAN 视为 WH_Qty = 0；库存 EAN 重复时合计
// ==========================================

use crate::domain::style::{StyleMasterEntry, StyleStockRow, WarehouseStock};
use crate::domain::types::Qty;
use std::collections::HashMap;
use tracing::debug;

pub struct StockJoiner;

impl StockJoiner {
    pub fn new() -> Self {
        Self
    }

    /// 关联库存，保持款式主档顺序
    pub fn join(
        &self,
        style_master: &[StyleMasterEntry],
        warehouse_stock: &[WarehouseStock],
    ) -> Vec<StyleStockRow> {
        let mut stock_by_ean: HashMap<&str, Qty> = HashMap::with_capacity(warehouse_stock.len());
        for stock in warehouse_stock {
            let qty = stock_by_ean.entry(stock.ean.as_str()).or_insert(0);
            *qty = qty.saturating_add(stock.wh_qty);
        }

        let mut unmatched = 0usize;
        let rows = style_master
            .iter()
            .map(|entry| {
                let wh_qty = match stock_by_ean.get(entry.ean.as_str()) {
                    Some(qty) => *qty,
                    None => {
                        unmatched += 1;
                        0
                    }
                };
                StyleStockRow {
                    style: entry.style.clone(),
                    ean: entry.ean.clone(),
                    hierarchy: entry.hierarchy.clone(),
                    size: entry.size.clone(),
                    wh_qty,
                    size_available: wh_qty > 0,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            rows = rows.len(),
            unmatched_eans = unmatched,
            "库存关联完成"
        );

        rows
    }
}

impl Default for StockJoiner {
    fn default() -> Self {
        Self::new()
    }
}
