// ==========================================
// 新店铺货系统 - 数据质量模型
// ==========================================
// 职责: DQ 违规记录 / 级别 / 报告
// ==========================================

use crate::domain::types::Dataset;
use serde::{Deserialize, Serialize};

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DqLevel {
    Error,    // 错误（阻断运行）
    Warning,  // 警告（允许运行）
    Info,     // 提示（仅记录）
    Conflict, // 冲突（主键重复等，按约定口径处理后允许运行）
}

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DqViolation {
    pub dataset: Dataset,       // 所属数据集
    pub row_number: usize,      // 原始文件行号（表头为第 1 行）
    pub key: Option<String>,    // 业务主键（如果可解析）
    pub level: DqLevel,         // 违规级别
    pub field: String,          // 违规字段
    pub message: String,        // 违规描述
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize, // 五张表总行数
    pub blocked: usize,    // 阻断（ERROR）
    pub warning: usize,    // 警告（WARNING）
    pub info: usize,       // 提示（INFO）
    pub conflict: usize,   // 冲突（CONFLICT）
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DqReport {
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
}

impl DqReport {
    pub fn has_errors(&self) -> bool {
        self.summary.blocked > 0
    }

    pub fn errors(&self) -> impl Iterator<Item = &DqViolation> {
        self.violations
            .iter()
            .filter(|v| matches!(v.level, DqLevel::Error))
    }
}
