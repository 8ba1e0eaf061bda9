// ==========================================
// 新店铺货系统 - 字段映射器实现
// ==========================================
// 职责: 必填列校验 + 原始表 → 强类型记录 + 数量类型转换
// 红线: 缺列/非数值数量直接报错，不做默默兜底
// ==========================================

use crate::domain::capacity::DisplayCapacity;
use crate::domain::curve::SizeCurveEntry;
use crate::domain::style::{SizeMasterEntry, StyleMasterEntry, WarehouseStock};
use crate::domain::types::{Dataset, HierarchyKey, Qty};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, RawTable};

pub struct FieldMapper;

impl FieldMapper {
    /// 校验必填列（列名精确匹配）
    pub fn ensure_columns(&self, dataset: Dataset, table: &RawTable) -> ImportResult<()> {
        for column in dataset.required_columns() {
            if !table.has_column(column) {
                return Err(ImportError::MissingColumn {
                    dataset,
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn map_display_capacity(&self, table: &RawTable) -> ImportResult<Vec<DisplayCapacity>> {
        let dataset = Dataset::DisplayCapacity;
        self.ensure_columns(dataset, table)?;

        table
            .rows
            .iter()
            .map(|row| {
                Ok(DisplayCapacity {
                    store: row.get("Store").to_string(),
                    hierarchy: self.hierarchy(row),
                    display_capacity: self.parse_qty(dataset, row, "DisplayCapacity")?,
                })
            })
            .collect()
    }

    pub fn map_style_master(&self, table: &RawTable) -> ImportResult<Vec<StyleMasterEntry>> {
        self.ensure_columns(Dataset::StyleMaster, table)?;

        Ok(table
            .rows
            .iter()
            .map(|row| StyleMasterEntry {
                style: row.get("Style").to_string(),
                ean: row.get("EAN").to_string(),
                hierarchy: self.hierarchy(row),
                size: row.get("Size").to_string(),
            })
            .collect())
    }

    pub fn map_warehouse_stock(&self, table: &RawTable) -> ImportResult<Vec<WarehouseStock>> {
        let dataset = Dataset::WarehouseStock;
        self.ensure_columns(dataset, table)?;

        table
            .rows
            .iter()
            .map(|row| {
                Ok(WarehouseStock {
                    ean: row.get("EAN").to_string(),
                    wh_qty: self.parse_qty(dataset, row, "WH_Qty")?,
                })
            })
            .collect()
    }

    pub fn map_size_curve(&self, table: &RawTable) -> ImportResult<Vec<SizeCurveEntry>> {
        let dataset = Dataset::SizeCurve;
        self.ensure_columns(dataset, table)?;

        table
            .rows
            .iter()
            .map(|row| {
                Ok(SizeCurveEntry {
                    hierarchy: self.hierarchy(row),
                    size: row.get("Size").to_string(),
                    curve_qty: self.parse_qty(dataset, row, "CurveQty")?,
                })
            })
            .collect()
    }

    pub fn map_size_master(&self, table: &RawTable) -> ImportResult<Vec<SizeMasterEntry>> {
        let dataset = Dataset::StyleSizeMaster;
        self.ensure_columns(dataset, table)?;

        table
            .rows
            .iter()
            .map(|row| {
                let total_sizes = self.parse_qty(dataset, row, "TotalSizes")?;
                let total_sizes =
                    u32::try_from(total_sizes).map_err(|_| ImportError::TypeConversionError {
                        dataset,
                        row: row.row_number,
                        field: "TotalSizes".to_string(),
                        value: row.get("TotalSizes").to_string(),
                        message: "尺码数超出范围".to_string(),
                    })?;
                Ok(SizeMasterEntry {
                    style: row.get("Style").to_string(),
                    total_sizes,
                })
            })
            .collect()
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn hierarchy(&self, row: &RawRow) -> HierarchyKey {
        HierarchyKey::new(
            row.get("Dept"),
            row.get("SubDept"),
            row.get("Class"),
            row.get("SubClass"),
            row.get("MC"),
        )
    }

    /// 解析非负整数数量
    ///
    /// 接受 "12" 与 "12.0"（表格软件导出常见）；
    /// 空值、非数值、负数、小数均视为不合法输入
    fn parse_qty(&self, dataset: Dataset, row: &RawRow, field: &str) -> ImportResult<Qty> {
        let value = row.get(field);
        let conversion_error = |message: &str| ImportError::TypeConversionError {
            dataset,
            row: row.row_number,
            field: field.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        };

        if value.is_empty() {
            return Err(conversion_error("数量为空"));
        }
        if let Ok(qty) = value.parse::<Qty>() {
            return Ok(qty);
        }

        let float = value
            .parse::<f64>()
            .map_err(|_| conversion_error("无法解析为数值"))?;
        if !float.is_finite() {
            return Err(conversion_error("数值非有限值"));
        }
        if float < 0.0 {
            return Err(conversion_error("数量为负数"));
        }
        if float.fract() != 0.0 {
            return Err(conversion_error("数量不是整数"));
        }
        if float > Qty::MAX as f64 {
            return Err(conversion_error("数量超出范围"));
        }
        Ok(float as Qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::file_parser::CsvParser;

    fn table(data: &str) -> RawTable {
        CsvParser.parse_reader(data.as_bytes()).unwrap()
    }

    #[test]
    fn test_missing_column_is_named() {
        let t = table("EAN,Qty\nE1,5\n");
        let err = FieldMapper.map_warehouse_stock(&t).unwrap_err();

        match err {
            ImportError::MissingColumn { dataset, column } => {
                assert_eq!(dataset, Dataset::WarehouseStock);
                assert_eq!(column, "WH_Qty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_quantity_is_rejected() {
        let t = table("EAN,WH_Qty\nE1,5\nE2,abc\n");
        let err = FieldMapper.map_warehouse_stock(&t).unwrap_err();

        match err {
            ImportError::TypeConversionError { row, field, value, .. } => {
                assert_eq!(row, 3);
                assert_eq!(field, "WH_Qty");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_float_formatted_integer_is_accepted() {
        let t = table("EAN,WH_Qty\nE1,12.0\n");
        let stock = FieldMapper.map_warehouse_stock(&t).unwrap();
        assert_eq!(stock[0].wh_qty, 12);
    }

    #[test]
    fn test_negative_and_fractional_quantities_are_rejected() {
        let negative = table("EAN,WH_Qty\nE1,-1\n");
        assert!(FieldMapper.map_warehouse_stock(&negative).is_err());

        let fractional = table("EAN,WH_Qty\nE1,1.5\n");
        assert!(FieldMapper.map_warehouse_stock(&fractional).is_err());
    }

    #[test]
    fn test_map_style_master_hierarchy() {
        let t = table(
            "Style,EAN,Dept,SubDept,Class,SubClass,MC,Size\nST1,E1,D1,SD1,C1,SC1,MC1,M\n",
        );
        let rows = FieldMapper.map_style_master(&t).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hierarchy, HierarchyKey::new("D1", "SD1", "C1", "SC1", "MC1"));
        assert_eq!(rows[0].size, "M");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let t = table("Style,TotalSizes,Remark\nST1,4,new season\n");
        let rows = FieldMapper.map_size_master(&t).unwrap();
        assert_eq!(rows[0].total_sizes, 4);
    }
}
