// ==========================================
// 新店铺货系统 - 引擎编排器
// ==========================================
// 用途: 协调库存关联 → 准入判定 → 曲线解析 → 门店分配 → 结果汇总
// 红线: 引擎不做文件读写；门店之间不共享可变状态
// ==========================================

use crate::config::AllocationConfig;
use crate::domain::allocation::AllocationRow;
use crate::domain::capacity::DisplayCapacity;
use crate::domain::inputs::AllocationInputs;
use crate::domain::report::{AllocationReport, ReportCounts};
use crate::domain::types::SkipReason;
use crate::engine::curve_resolver::CurveResolver;
use crate::engine::eligibility::{EligibilityEngine, EligibilityResult};
use crate::engine::result_assembler::ResultAssembler;
use crate::engine::stock_joiner::StockJoiner;
use crate::engine::strategy::{StoreAllocation, StoreAllocator};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, instrument};

// ==========================================
// AllocationOutcome - 分配结果
// ==========================================
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    // 输出表（门店顺序 → 策略内部顺序）
    pub rows: Vec<AllocationRow>,

    // 运行报告
    pub report: AllocationReport,
}

// ==========================================
// AllocationOrchestrator - 引擎编排器
// ==========================================
pub struct AllocationOrchestrator {
    config: AllocationConfig,
    joiner: StockJoiner,
    eligibility: EligibilityEngine,
}

impl AllocationOrchestrator {
    /// 创建新的编排器实例
    pub fn new(config: AllocationConfig) -> Self {
        Self {
            config,
            joiner: StockJoiner::new(),
            eligibility: EligibilityEngine::new(),
        }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// 仅执行库存关联 + 准入判定（不分配）
    pub fn evaluate_eligibility(&self, inputs: &AllocationInputs) -> EligibilityResult {
        let stock_rows = self.joiner.join(&inputs.style_master, &inputs.warehouse_stock);
        self.eligibility
            .evaluate(&stock_rows, &inputs.size_master, self.config.style_order)
    }

    /// 执行完整分配流程
    ///
    /// # 参数
    /// - inputs: 已校验的输入快照
    ///
    /// # 返回
    /// 分配行 + 运行报告
    #[instrument(skip_all, fields(
        policy = %self.config.policy,
        style_order = %self.config.style_order,
        parallel = self.config.parallel_stores
    ))]
    pub fn run(&self, inputs: &AllocationInputs) -> AllocationOutcome {
        let started = Instant::now();
        let mut report = AllocationReport::new(
            self.config.policy.as_str(),
            self.config.style_order.as_str(),
            self.config.parallel_stores,
        );

        info!(
            run_id = %report.run_id,
            policy = self.config.policy.title_cn(),
            capacity_rows = inputs.display_capacity.len(),
            style_master_rows = inputs.style_master.len(),
            "开始执行铺货分配"
        );

        // ==========================================
        // 步骤1-2: 库存关联 + 尺码齐全度准入
        // ==========================================
        debug!("步骤1: 库存关联与尺码齐全度准入");
        let eligibility = self.evaluate_eligibility(inputs);

        // ==========================================
        // 步骤3: 尺码曲线
        // ==========================================
        debug!("步骤2: 加载尺码曲线");
        let curves = CurveResolver::new(&inputs.size_curve);

        // ==========================================
        // 步骤4: 门店分配
        // ==========================================
        let stores = inputs.stores();
        let capacity_by_store = group_capacity_by_store(&inputs.display_capacity);
        debug!(stores = stores.len(), "步骤3: 逐门店分配");

        let allocator = self.config.policy.allocator();
        let allocate = |store: &String| -> StoreAllocation {
            let rows = capacity_by_store
                .get(store.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            allocator.allocate_store(store, rows, &curves, &eligibility.pool)
        };

        // rayon 的有序 collect 保证与串行结果一致
        let per_store: Vec<StoreAllocation> = if self.config.parallel_stores {
            stores.par_iter().map(allocate).collect()
        } else {
            stores.iter().map(allocate).collect()
        };

        // ==========================================
        // 步骤5: 结果汇总
        // ==========================================
        let assembled = ResultAssembler::assemble(per_store);
        let without_curve = assembled
            .skipped
            .iter()
            .filter(|s| s.reason == SkipReason::NoCurve)
            .count();

        report.counts = ReportCounts {
            stores: stores.len(),
            capacity_rows: inputs.display_capacity.len(),
            hierarchies_processed: inputs.display_capacity.len().saturating_sub(without_curve),
            hierarchies_without_curve: without_curve,
            eligible_styles: eligibility.eligible_count(),
            ineligible_styles: eligibility.ineligible_count(),
            pool_rows: eligibility.pool.len(),
            allocation_rows: assembled.rows.len(),
            allocated_units: assembled.allocated_units(),
            skipped: assembled.skipped.len(),
        };
        report.availability = eligibility.availability;
        report.skipped = assembled.skipped;
        report.elapsed_ms = started.elapsed().as_millis() as u64;

        info!(
            run_id = %report.run_id,
            rows = report.counts.allocation_rows,
            units = report.counts.allocated_units,
            skipped = report.counts.skipped,
            elapsed_ms = report.elapsed_ms,
            "铺货分配完成"
        );

        AllocationOutcome {
            rows: assembled.rows,
            report,
        }
    }
}

/// 门店 → 陈列容量行（保持输入顺序）
fn group_capacity_by_store(rows: &[DisplayCapacity]) -> HashMap<&str, Vec<&DisplayCapacity>> {
    let mut grouped: HashMap<&str, Vec<&DisplayCapacity>> = HashMap::new();
    for row in rows {
        grouped.entry(row.store.as_str()).or_default().push(row);
    }
    grouped
}
