// ==========================================
// 新店铺货系统 - 配置管理器
// ==========================================
// 职责: 配置文件定位、加载、覆写
// 查找顺序: 显式路径 → $STORE_ALLOCATION_CONFIG → <config_dir>/store-allocation/config.json → 默认值
// ==========================================

use crate::config::allocation_config::{AllocationConfig, ConfigOverrides};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "STORE_ALLOCATION_CONFIG";

/// 用户配置目录下的子目录名
pub const CONFIG_DIR_NAME: &str = "store-allocation";

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    NotFound(String),

    #[error("配置文件读取失败: {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("导出分隔符必须是单字节 ASCII 字符: {0:?}")]
    InvalidDelimiter(char),
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Env(PathBuf),
    UserConfigDir(PathBuf),
    Default,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: AllocationConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// 按查找顺序加载配置
    ///
    /// # 参数
    /// - explicit: 显式指定的配置文件（必须存在）
    ///
    /// 环境变量与用户配置目录中的文件不存在时跳过
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            return Self::from_file(path, ConfigSource::Explicit(path.to_path_buf()));
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) {
            if path.exists() {
                return Self::from_file(&path, ConfigSource::Env(path.clone()));
            }
            debug!(path = %path.display(), "环境变量指定的配置文件不存在，跳过");
        }

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                return Self::from_file(&path, ConfigSource::UserConfigDir(path.clone()));
            }
        }

        debug!("未找到配置文件，使用默认配置");
        Ok(Self {
            config: AllocationConfig::default(),
            source: ConfigSource::Default,
        })
    }

    /// 直接使用给定配置（测试/嵌入调用）
    pub fn from_config(config: AllocationConfig) -> Result<Self, ConfigError> {
        Self::validate(&config)?;
        Ok(Self {
            config,
            source: ConfigSource::Default,
        })
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    fn from_file(path: &Path, source: ConfigSource) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: AllocationConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;
        Self::validate(&config)?;

        info!(
            path = %path.display(),
            policy = %config.policy,
            style_order = %config.style_order,
            parallel_stores = config.parallel_stores,
            "配置加载完成"
        );

        Ok(Self { config, source })
    }

    fn validate(config: &AllocationConfig) -> Result<(), ConfigError> {
        if config.delimiter_byte().is_none() {
            return Err(ConfigError::InvalidDelimiter(config.output_delimiter));
        }
        Ok(())
    }

    /// 应用覆写（命令行参数优先于配置文件）
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        let config = self.config.clone().with_overrides(overrides);
        Self::validate(&config)?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    pub fn into_config(self) -> AllocationConfig {
        self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 配置快照（写入运行日志/报告）
    pub fn snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.config)
    }
}
