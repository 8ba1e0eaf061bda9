// ==========================================
// 新店铺货系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、约束接口
// 红线: 不含文件读写,不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod capacity;
pub mod curve;
pub mod dq;
pub mod inputs;
pub mod report;
pub mod style;
pub mod types;

// 重导出核心类型
pub use allocation::{AllocationRow, AllocationSkip};
pub use capacity::{CapacityBudget, CapacityConstraint, DisplayCapacity};
pub use curve::{HierarchyCurve, SizeCurveEntry};
pub use dq::{DqLevel, DqReport, DqSummary, DqViolation};
pub use inputs::AllocationInputs;
pub use report::{AllocationReport, ReportCounts};
pub use style::{
    SizeMasterEntry, StyleAvailability, StyleMasterEntry, StyleStockRow, WarehouseStock,
};
pub use types::{Dataset, EligibilityStatus, HierarchyKey, Qty, SkipReason};
