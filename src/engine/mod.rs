// ==========================================
// 新店铺货系统 - 引擎层
// ==========================================
// 职责: 实现准入与分配规则,不做文件读写
// 红线: 所有跳过/排除必须输出原因码
// ==========================================

pub mod capacity_filler;
pub mod curve_resolver;
pub mod eligibility;
pub mod eligibility_core;
pub mod orchestrator;
pub mod result_assembler;
pub mod scaled_allocator;
pub mod stock_joiner;
pub mod strategy;

// 重导出核心引擎
pub use capacity_filler::{CapacityFiller, FillHierarchyResult};
pub use curve_resolver::CurveResolver;
pub use eligibility::{EligibilityEngine, EligibilityResult, EligiblePool};
pub use eligibility_core::{EligibilityCore, ELIGIBILITY_THRESHOLD};
pub use orchestrator::{AllocationOrchestrator, AllocationOutcome};
pub use result_assembler::{AssembledResult, ResultAssembler};
pub use scaled_allocator::ScaledSetAllocator;
pub use stock_joiner::StockJoiner;
pub use strategy::{AllocationPolicy, StoreAllocation, StoreAllocator, StyleOrder};
