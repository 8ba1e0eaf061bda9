// ==========================================
// 新店铺货系统 - 运行报告
// ==========================================
// 用途: 单次分配运行的元数据、计数与可解释性记录
// 序列化: JSON（与导出文件一起归档）
// ==========================================

use crate::domain::allocation::AllocationSkip;
use crate::domain::dq::DqSummary;
use crate::domain::style::StyleAvailability;
use crate::domain::types::{Qty, SkipReason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 运行计数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCounts {
    pub stores: usize,
    pub capacity_rows: usize,
    pub hierarchies_processed: usize, // 容量行 - 无曲线跳过
    pub hierarchies_without_curve: usize,
    pub eligible_styles: usize,
    pub ineligible_styles: usize,
    pub pool_rows: usize,
    pub allocation_rows: usize,
    pub allocated_units: Qty,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub policy: String,
    pub style_order: String,
    pub parallel_stores: bool,
    pub counts: ReportCounts,
    pub dq_summary: Option<DqSummary>,
    pub availability: Vec<StyleAvailability>,
    pub skipped: Vec<AllocationSkip>,
}

impl AllocationReport {
    pub fn new(policy: &str, style_order: &str, parallel_stores: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            elapsed_ms: 0,
            policy: policy.to_string(),
            style_order: style_order.to_string(),
            parallel_stores,
            counts: ReportCounts::default(),
            dq_summary: None,
            availability: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// 按原因统计跳过记录
    pub fn skipped_with(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
