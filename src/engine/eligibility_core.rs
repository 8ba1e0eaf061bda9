// ==========================================
// 新店铺货系统 - Eligibility Core 纯函数库
// ==========================================
// 职责: 尺码齐全度计算、准入判定的纯逻辑
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::types::EligibilityStatus;

/// 尺码齐全度准入阈值（设计常量，不开放配置）
pub const ELIGIBILITY_THRESHOLD: f64 = 0.75;

// ==========================================
// EligibilityCore - 纯函数工具类
// ==========================================
pub struct EligibilityCore;

impl EligibilityCore {
    /// 计算尺码齐全度
    ///
    /// # 规则
    /// - availability_pct = available_sizes / total_sizes
    /// - total_sizes = 0 → None（不做除法）
    ///
    /// # 参数
    /// - available_sizes: 有库存（WH_Qty > 0）的 EAN 数
    /// - total_sizes: 尺码主档声明的尺码数
    pub fn availability_pct(available_sizes: u32, total_sizes: u32) -> Option<f64> {
        if total_sizes == 0 {
            return None;
        }
        Some(available_sizes as f64 / total_sizes as f64)
    }

    /// 判定款式准入状态
    ///
    /// # 规则
    /// 1. 尺码主档缺失 → SIZE_MASTER_MISSING
    /// 2. total_sizes = 0 → TOTAL_SIZES_ZERO
    /// 3. availability_pct >= 0.75 → ELIGIBLE
    /// 4. 否则 → BELOW_THRESHOLD
    ///
    /// # 返回
    /// - (EligibilityStatus, Option<f64>): 状态 + 齐全度
    pub fn determine_status(
        available_sizes: u32,
        total_sizes: Option<u32>,
    ) -> (EligibilityStatus, Option<f64>) {
        let total_sizes = match total_sizes {
            Some(total) => total,
            None => return (EligibilityStatus::SizeMasterMissing, None),
        };

        match Self::availability_pct(available_sizes, total_sizes) {
            None => (EligibilityStatus::TotalSizesZero, None),
            Some(pct) if pct >= ELIGIBILITY_THRESHOLD => (EligibilityStatus::Eligible, Some(pct)),
            Some(pct) => (EligibilityStatus::BelowThreshold, Some(pct)),
        }
    }
}
