// ==========================================
// 新店铺货系统 - 核心库
// ==========================================
// 技术栈: Rust + CSV/Excel
// 系统定位: 新店首铺分配计算（按尺码曲线整套铺货）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 准入与分配规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 结果表
pub mod exporter;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Dataset, EligibilityStatus, HierarchyKey, Qty, SkipReason};

// 领域实体
pub use domain::{
    AllocationInputs, AllocationReport, AllocationRow, AllocationSkip, DisplayCapacity,
    SizeCurveEntry, SizeMasterEntry, StyleAvailability, StyleMasterEntry, WarehouseStock,
};

// 引擎
pub use engine::{
    AllocationOrchestrator, AllocationOutcome, AllocationPolicy, CapacityFiller, CurveResolver,
    EligibilityEngine, ScaledSetAllocator, StockJoiner, StyleOrder,
};

// 配置
pub use config::{AllocationConfig, ConfigManager};

// API
pub use api::{AllocationApi, ApiError, ApiResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "新店铺货系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
