// ==========================================
// 新店铺货系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 输入不合法时拒绝运行，不产出部分分配
// ==========================================

use crate::domain::types::Dataset;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 列与类型错误 =====
    #[error("缺少输入数据集: {0}")]
    MissingInput(Dataset),

    #[error("缺少必填列 (数据集 {dataset}): {column}")]
    MissingColumn { dataset: Dataset, column: String },

    #[error("类型转换失败 (数据集 {dataset}, 行 {row}, 字段 {field}, 值 '{value}'): {message}")]
    TypeConversionError {
        dataset: Dataset,
        row: usize,
        field: String,
        value: String,
        message: String,
    },

    // ===== 数据质量错误 =====
    #[error("数据质量阻断: {blocked} 条 ERROR 级违规，首条: {first}")]
    DqBlocked { blocked: usize, first: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
