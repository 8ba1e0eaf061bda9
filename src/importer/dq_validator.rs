// ==========================================
// 新店铺货系统 - 数据质量校验器实现
// ==========================================
// 职责: 主键非空 / 主键重复 / EAN 归属冲突 + DQ 报告生成
// 口径:
// - ERROR: 主键为空，阻断运行
// - CONFLICT: 同键多值（按约定口径合并或取首条）
// - WARNING: 重复但不影响口径的记录
// ==========================================

use crate::domain::dq::{DqLevel, DqReport, DqSummary, DqViolation};
use crate::domain::types::Dataset;
use crate::importer::file_parser::{RawRow, RawTable};
use std::collections::HashMap;

const HIERARCHY_COLUMNS: [&str; 5] = ["Dept", "SubDept", "Class", "SubClass", "MC"];

pub struct DqValidator;

impl DqValidator {
    pub fn new() -> Self {
        Self
    }

    /// 按数据集执行全部校验
    pub fn validate_table(&self, dataset: Dataset, table: &RawTable) -> Vec<DqViolation> {
        match dataset {
            Dataset::DisplayCapacity => self.validate_display_capacity(table),
            Dataset::StyleMaster => self.validate_style_master(table),
            Dataset::WarehouseStock => self.validate_warehouse_stock(table),
            Dataset::SizeCurve => self.validate_size_curve(table),
            Dataset::StyleSizeMaster => self.validate_size_master(table),
        }
    }

    /// 陈列容量: Store 非空；门店 × 层级重复记录各自独立分配
    fn validate_display_capacity(&self, table: &RawTable) -> Vec<DqViolation> {
        let dataset = Dataset::DisplayCapacity;
        let mut violations = self.required_keys(dataset, table, &["Store"]);
        violations.extend(self.blank_hierarchy(dataset, table));

        let mut seen = HashMap::new();
        for row in &table.rows {
            let key = format!("{}@{}", row.get("Store"), hierarchy_text(row));
            if let Some(first_row) = seen.insert(key.clone(), row.row_number) {
                violations.push(violation(
                    dataset,
                    row,
                    Some(key),
                    DqLevel::Warning,
                    "Store,Dept,SubDept,Class,SubClass,MC",
                    format!("门店 × 层级重复（首次出现于行 {}），按独立容量行处理", first_row),
                ));
            }
        }

        violations
    }

    /// 款式主档: Style/EAN/Size 非空；EAN 唯一且只属于一个款式
    fn validate_style_master(&self, table: &RawTable) -> Vec<DqViolation> {
        let dataset = Dataset::StyleMaster;
        let mut violations = self.required_keys(dataset, table, &["Style", "EAN", "Size"]);
        violations.extend(self.blank_hierarchy(dataset, table));

        let mut ean_owner: HashMap<&str, (&str, usize)> = HashMap::new();
        for row in &table.rows {
            let ean = row.get("EAN");
            let style = row.get("Style");
            if ean.is_empty() {
                continue;
            }

            match ean_owner.get(ean).copied() {
                None => {
                    ean_owner.insert(ean, (style, row.row_number));
                }
                Some((owner, first_row)) if owner == style => {
                    violations.push(violation(
                        dataset,
                        row,
                        Some(ean.to_string()),
                        DqLevel::Warning,
                        "EAN",
                        format!("EAN 重复（首次出现于行 {}）", first_row),
                    ));
                }
                Some((owner, first_row)) => {
                    violations.push(violation(
                        dataset,
                        row,
                        Some(ean.to_string()),
                        DqLevel::Conflict,
                        "EAN",
                        format!(
                            "EAN 归属多个款式: {}（行 {}） / {}",
                            owner, first_row, style
                        ),
                    ));
                }
            }
        }

        violations
    }

    /// 仓库库存: EAN 非空；重复 EAN 合并为一个库存口径
    fn validate_warehouse_stock(&self, table: &RawTable) -> Vec<DqViolation> {
        let dataset = Dataset::WarehouseStock;
        let mut violations = self.required_keys(dataset, table, &["EAN"]);
        violations.extend(self.duplicate_keys(
            dataset,
            table,
            &["EAN"],
            DqLevel::Conflict,
            "库存 EAN 重复，数量按合计处理",
        ));
        violations
    }

    /// 尺码曲线: Size 非空；层级 × 尺码重复时合计
    fn validate_size_curve(&self, table: &RawTable) -> Vec<DqViolation> {
        let dataset = Dataset::SizeCurve;
        let mut violations = self.required_keys(dataset, table, &["Size"]);
        violations.extend(self.blank_hierarchy(dataset, table));
        violations.extend(self.duplicate_keys(
            dataset,
            table,
            &["Dept", "SubDept", "Class", "SubClass", "MC", "Size"],
            DqLevel::Warning,
            "层级 × 尺码重复，曲线数量按合计处理",
        ));
        violations
    }

    /// 尺码主档: Style 非空；重复款式取首条
    fn validate_size_master(&self, table: &RawTable) -> Vec<DqViolation> {
        let dataset = Dataset::StyleSizeMaster;
        let mut violations = self.required_keys(dataset, table, &["Style"]);
        violations.extend(self.duplicate_keys(
            dataset,
            table,
            &["Style"],
            DqLevel::Conflict,
            "尺码主档款式重复，取首条记录",
        ));
        violations
    }

    /// 生成 DQ 报告
    pub fn generate_dq_report(&self, total_rows: usize, violations: Vec<DqViolation>) -> DqReport {
        let count = |level: DqLevel| violations.iter().filter(|v| v.level == level).count();

        DqReport {
            summary: DqSummary {
                total_rows,
                blocked: count(DqLevel::Error),
                warning: count(DqLevel::Warning),
                info: count(DqLevel::Info),
                conflict: count(DqLevel::Conflict),
            },
            violations,
        }
    }

    // ==========================================
    // 通用规则
    // ==========================================

    fn required_keys(
        &self,
        dataset: Dataset,
        table: &RawTable,
        columns: &[&str],
    ) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        for row in &table.rows {
            for column in columns {
                if row.get(column).is_empty() {
                    violations.push(violation(
                        dataset,
                        row,
                        None,
                        DqLevel::Error,
                        column,
                        format!("主键字段 {} 为空", column),
                    ));
                }
            }
        }
        violations
    }

    fn blank_hierarchy(&self, dataset: Dataset, table: &RawTable) -> Vec<DqViolation> {
        table
            .rows
            .iter()
            .filter(|row| HIERARCHY_COLUMNS.iter().any(|c| row.get(c).is_empty()))
            .map(|row| {
                violation(
                    dataset,
                    row,
                    Some(hierarchy_text(row)),
                    DqLevel::Warning,
                    "Dept,SubDept,Class,SubClass,MC",
                    "层级字段存在空值，按空串参与精确匹配".to_string(),
                )
            })
            .collect()
    }

    fn duplicate_keys(
        &self,
        dataset: Dataset,
        table: &RawTable,
        columns: &[&str],
        level: DqLevel,
        message: &str,
    ) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen = HashMap::new();

        for row in &table.rows {
            let key = columns
                .iter()
                .map(|c| row.get(c))
                .collect::<Vec<_>>()
                .join("/");
            if let Some(first_row) = seen.insert(key.clone(), row.row_number) {
                violations.push(violation(
                    dataset,
                    row,
                    Some(key),
                    level,
                    &columns.join(","),
                    format!("{}（首次出现于行 {}）", message, first_row),
                ));
            }
        }

        violations
    }
}

impl Default for DqValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn hierarchy_text(row: &RawRow) -> String {
    HIERARCHY_COLUMNS
        .iter()
        .map(|c| row.get(c))
        .collect::<Vec<_>>()
        .join("/")
}

fn violation(
    dataset: Dataset,
    row: &RawRow,
    key: Option<String>,
    level: DqLevel,
    field: &str,
    message: String,
) -> DqViolation {
    DqViolation {
        dataset,
        row_number: row.row_number,
        key,
        level,
        field: field.to_string(),
        message,
    }
}
