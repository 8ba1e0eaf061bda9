use crate::engine::strategy::{AllocationPolicy, StyleOrder};
use serde::{Deserialize, Serialize};

/// 分配运行配置（JSON 文件）
///
/// 尺码齐全度阈值为设计常量，不在此处开放
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// 分配策略（set_based / scaled_full_set）
    pub policy: AllocationPolicy,

    /// 款式处理顺序（input_order / style_id）
    pub style_order: StyleOrder,

    /// 门店并行计算（结果与串行一致）
    pub parallel_stores: bool,

    /// 导出分隔符
    pub output_delimiter: char,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            policy: AllocationPolicy::default(),
            style_order: StyleOrder::default(),
            parallel_stores: false,
            output_delimiter: ',',
        }
    }
}

/// 命令行等外部来源的覆写项（None 表示不覆写）
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub policy: Option<AllocationPolicy>,
    pub style_order: Option<StyleOrder>,
    pub parallel_stores: Option<bool>,
    pub output_delimiter: Option<char>,
}

impl AllocationConfig {
    /// 应用覆写
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(policy) = overrides.policy {
            self.policy = policy;
        }
        if let Some(style_order) = overrides.style_order {
            self.style_order = style_order;
        }
        if let Some(parallel) = overrides.parallel_stores {
            self.parallel_stores = parallel;
        }
        if let Some(delimiter) = overrides.output_delimiter {
            self.output_delimiter = delimiter;
        }
        self
    }

    /// 导出分隔符需为单字节 ASCII
    pub fn delimiter_byte(&self) -> Option<u8> {
        if self.output_delimiter.is_ascii() {
            Some(self.output_delimiter as u8)
        } else {
            None
        }
    }
}
