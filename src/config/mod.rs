// ==========================================
// 新店铺货系统 - 配置层
// ==========================================
// 职责: 运行配置管理,支持文件 + 命令行覆写
// 存储: JSON 配置文件
// ==========================================

pub mod allocation_config;
pub mod config_manager;

// 重导出核心配置管理器
pub use allocation_config::{AllocationConfig, ConfigOverrides};
pub use config_manager::{ConfigError, ConfigManager, ConfigSource, CONFIG_ENV_VAR};
