// ==========================================
// 新店铺货系统 - API层错误类型
// ==========================================
// 职责: 汇总导入/配置/导出错误，转换为调用方可读的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::exporter::ExportError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误（前置条件失败，不产生任何分配）
    // ==========================================
    #[error("输入数据错误: {0}")]
    Import(#[from] ImportError),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 输出错误
    // ==========================================
    #[error("导出失败: {0}")]
    Export(#[from] ExportError),

    #[error("运行报告写入失败: {0}")]
    ReportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否为输入前置条件失败（缺文件/缺列/非数值/DQ 阻断）
    pub fn is_precondition_failure(&self) -> bool {
        matches!(self, ApiError::Import(_) | ApiError::InvalidInput(_))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Dataset;

    #[test]
    fn test_import_error_is_precondition_failure() {
        let err: ApiError = ImportError::MissingInput(Dataset::SizeCurve).into();
        assert!(err.is_precondition_failure());
        assert!(err.to_string().starts_with("输入数据错误"));
    }

    #[test]
    fn test_export_error_is_not_precondition_failure() {
        let err: ApiError = ExportError::InvalidDelimiter('，').into();
        assert!(!err.is_precondition_failure());
    }
}
