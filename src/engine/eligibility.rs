// ==========================================
// 新店铺货系统 - 尺码齐全度准入引擎
// ==========================================
// 红线: 齐全度分母为尺码主档声明尺码数，不是库存中出现的尺码数
// ==========================================
// 职责: 按款式统计有库存尺码 → 齐全度 → 准入判定 → 准入款式池
// 输入: 款式库存行 + 尺码主档
// 输出: 每款齐全度记录 + EligiblePool
// ==========================================

use crate::domain::style::{SizeMasterEntry, StyleAvailability, StyleStockRow};
use crate::domain::types::HierarchyKey;
use crate::engine::eligibility_core::EligibilityCore;
use crate::engine::strategy::StyleOrder;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

// ==========================================
// EligiblePool - 准入款式池
// ==========================================
// 款式顺序即分配顺序（Policy A 的容量争用按此顺序决胜）
#[derive(Debug, Clone, Default)]
pub struct EligiblePool {
    rows: Vec<StyleStockRow>,
    styles: Vec<String>,
    rows_by_style: HashMap<String, Vec<usize>>,
    styles_by_hierarchy: HashMap<HierarchyKey, Vec<String>>,
}

impl EligiblePool {
    /// 构建款式池
    ///
    /// # 参数
    /// - rows: 准入款式的库存行（保持款式主档顺序）
    /// - style_order: 款式处理顺序
    pub fn build(rows: Vec<StyleStockRow>, style_order: StyleOrder) -> Self {
        let mut styles: Vec<String> = Vec::new();
        let mut rows_by_style: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, row) in rows.iter().enumerate() {
            let indices = rows_by_style.entry(row.style.clone()).or_default();
            if indices.is_empty() {
                styles.push(row.style.clone());
            }
            indices.push(idx);
        }

        if style_order == StyleOrder::StyleId {
            styles.sort();
        }

        let mut styles_by_hierarchy: HashMap<HierarchyKey, Vec<String>> = HashMap::new();
        for style in &styles {
            let mut seen = HashSet::new();
            for idx in &rows_by_style[style] {
                let hierarchy = &rows[*idx].hierarchy;
                if seen.insert(hierarchy) {
                    styles_by_hierarchy
                        .entry(hierarchy.clone())
                        .or_default()
                        .push(style.clone());
                }
            }
        }

        Self {
            rows,
            styles,
            rows_by_style,
            styles_by_hierarchy,
        }
    }

    /// 款式列表（分配顺序）
    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    pub fn rows(&self) -> &[StyleStockRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 某层级下的准入款式（分配顺序）
    pub fn styles_in(&self, hierarchy: &HierarchyKey) -> &[String] {
        self.styles_by_hierarchy
            .get(hierarchy)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 款式的全部库存行（款式主档顺序）
    pub fn rows_of_style(&self, style: &str) -> impl Iterator<Item = &StyleStockRow> + '_ {
        self.rows_by_style
            .get(style)
            .into_iter()
            .flatten()
            .map(move |idx| &self.rows[*idx])
    }

    /// 款式在指定层级下的库存行
    pub fn rows_for<'a>(
        &'a self,
        style: &str,
        hierarchy: &'a HierarchyKey,
    ) -> impl Iterator<Item = &'a StyleStockRow> + 'a {
        self.rows_of_style(style)
            .filter(move |row| &row.hierarchy == hierarchy)
    }
}

/// 准入判定结果
#[derive(Debug, Clone, Default)]
pub struct EligibilityResult {
    pub availability: Vec<StyleAvailability>, // 款式首次出现顺序
    pub pool: EligiblePool,
}

impl EligibilityResult {
    pub fn eligible_count(&self) -> usize {
        self.availability.iter().filter(|a| a.is_eligible()).count()
    }

    pub fn ineligible_count(&self) -> usize {
        self.availability.len() - self.eligible_count()
    }
}

// ==========================================
// EligibilityEngine - 尺码齐全度准入引擎
// ==========================================
// 红线: 不读写文件,只计算和返回结果
pub struct EligibilityEngine;

impl EligibilityEngine {
    pub fn new() -> Self {
        Self
    }

    /// 评估全部款式
    ///
    /// # 流程
    /// 1. 按款式统计 size_available 行数 → available_sizes
    /// 2. 关联尺码主档（重复款式取首条）→ total_sizes
    /// 3. 齐全度判定
    /// 4. 准入款式的库存行进入款式池
    #[instrument(skip_all, fields(rows = stock_rows.len(), size_master = size_master.len()))]
    pub fn evaluate(
        &self,
        stock_rows: &[StyleStockRow],
        size_master: &[SizeMasterEntry],
        style_order: StyleOrder,
    ) -> EligibilityResult {
        // === 步骤 1: 按款式统计 ===
        let mut style_order_seen: Vec<&str> = Vec::new();
        let mut available_by_style: HashMap<&str, u32> = HashMap::new();
        for row in stock_rows {
            let count = available_by_style
                .entry(row.style.as_str())
                .or_insert_with(|| {
                    style_order_seen.push(row.style.as_str());
                    0
                });
            if row.size_available {
                *count += 1;
            }
        }

        // === 步骤 2: 尺码主档 ===
        let mut total_by_style: HashMap<&str, u32> = HashMap::with_capacity(size_master.len());
        for entry in size_master {
            total_by_style
                .entry(entry.style.as_str())
                .or_insert(entry.total_sizes);
        }

        // === 步骤 3: 齐全度判定 ===
        let availability: Vec<StyleAvailability> = style_order_seen
            .iter()
            .map(|style| {
                let available_sizes = available_by_style[style];
                let total_sizes = total_by_style.get(style).copied();
                let (status, availability_pct) =
                    EligibilityCore::determine_status(available_sizes, total_sizes);

                debug!(
                    style = %style,
                    available_sizes,
                    ?total_sizes,
                    %status,
                    "款式齐全度判定"
                );

                StyleAvailability {
                    style: style.to_string(),
                    available_sizes,
                    total_sizes,
                    availability_pct,
                    status,
                }
            })
            .collect();

        // === 步骤 4: 款式池 ===
        let eligible: HashSet<&str> = availability
            .iter()
            .filter(|a| a.is_eligible())
            .map(|a| a.style.as_str())
            .collect();
        let pool_rows: Vec<StyleStockRow> = stock_rows
            .iter()
            .filter(|row| eligible.contains(row.style.as_str()))
            .cloned()
            .collect();

        let pool = EligiblePool::build(pool_rows, style_order);

        let result = EligibilityResult { availability, pool };
        info!(
            eligible_styles = result.eligible_count(),
            ineligible_styles = result.ineligible_count(),
            pool_rows = result.pool.len(),
            "尺码齐全度准入判定完成"
        );

        result
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new()
    }
}
