// ==========================================
// 新店铺货系统 - 结果导出
// ==========================================
// 职责: 分配结果表 / 尺码齐全度表 → 分隔符文本
// 红线: 导出不重排、不聚合；相同输入导出字节一致
// ==========================================

use crate::domain::allocation::AllocationRow;
use crate::domain::style::StyleAvailability;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// 分配结果表头（与 AllocationRow 序列化列名一致）
pub const ALLOCATION_HEADER: &[&str] = &[
    "Store",
    "Dept",
    "SubDept",
    "Class",
    "SubClass",
    "MC",
    "Style",
    "EAN",
    "Size",
    "AllocatedQty",
];

/// 尺码齐全度表头
pub const ELIGIBILITY_HEADER: &[&str] = &[
    "Style",
    "Available_Sizes",
    "TotalSizes",
    "Availability_%",
    "Status",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("导出文件创建失败: {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("导出分隔符必须是单字节 ASCII 字符: {0:?}")]
    InvalidDelimiter(char),
}

pub type ExportResult<T> = Result<T, ExportError>;

// ==========================================
// CsvExporter
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    delimiter: u8,
}

impl CsvExporter {
    pub fn new(delimiter: char) -> ExportResult<Self> {
        if !delimiter.is_ascii() {
            return Err(ExportError::InvalidDelimiter(delimiter));
        }
        Ok(Self {
            delimiter: delimiter as u8,
        })
    }

    fn writer<W: Write>(&self, inner: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(inner)
    }

    /// 写出分配结果（空结果仍写表头）
    pub fn write_allocations<W: Write>(&self, inner: W, rows: &[AllocationRow]) -> ExportResult<()> {
        let mut writer = self.writer(inner);
        writer.write_record(ALLOCATION_HEADER)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 写出尺码齐全度表（未定义的比例留空）
    pub fn write_eligibility<W: Write>(
        &self,
        inner: W,
        records: &[StyleAvailability],
    ) -> ExportResult<()> {
        let mut writer = self.writer(inner);
        writer.write_record(ELIGIBILITY_HEADER)?;
        for record in records {
            writer.write_record([
                record.style.clone(),
                record.available_sizes.to_string(),
                record
                    .total_sizes
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
                record
                    .availability_pct
                    .map(|p| format!("{:.4}", p))
                    .unwrap_or_default(),
                record.status.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn allocations_to_string(&self, rows: &[AllocationRow]) -> ExportResult<String> {
        let mut buffer = Vec::new();
        self.write_allocations(&mut buffer, rows)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn export_allocations(&self, path: &Path, rows: &[AllocationRow]) -> ExportResult<()> {
        let file = create_file(path)?;
        self.write_allocations(file, rows)?;
        info!(path = %path.display(), rows = rows.len(), "分配结果导出完成");
        Ok(())
    }

    pub fn export_eligibility(
        &self,
        path: &Path,
        records: &[StyleAvailability],
    ) -> ExportResult<()> {
        let file = create_file(path)?;
        self.write_eligibility(file, records)?;
        info!(path = %path.display(), styles = records.len(), "尺码齐全度导出完成");
        Ok(())
    }
}

fn create_file(path: &Path) -> ExportResult<File> {
    File::create(path).map_err(|e| ExportError::Create {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{EligibilityStatus, HierarchyKey};

    fn rows() -> Vec<AllocationRow> {
        let key = HierarchyKey::new("D1", "SD1", "C1", "SC1", "MC1");
        vec![
            AllocationRow::new("S1", &key, "X", "E1", "M", 3),
            AllocationRow::new("S1", &key, "X", "E2", "L", 2),
        ]
    }

    #[test]
    fn test_allocation_csv_layout() {
        let text = CsvExporter::new(',').unwrap().allocations_to_string(&rows()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Store,Dept,SubDept,Class,SubClass,MC,Style,EAN,Size,AllocatedQty"
        );
        assert_eq!(lines[1], "S1,D1,SD1,C1,SC1,MC1,X,E1,M,3");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_result_keeps_header() {
        let text = CsvExporter::new(';').unwrap().allocations_to_string(&[]).unwrap();
        assert_eq!(
            text,
            "Store;Dept;SubDept;Class;SubClass;MC;Style;EAN;Size;AllocatedQty\n"
        );
    }

    #[test]
    fn test_eligibility_table() {
        let records = vec![
            StyleAvailability {
                style: "X".to_string(),
                available_sizes: 3,
                total_sizes: Some(4),
                availability_pct: Some(0.75),
                status: EligibilityStatus::Eligible,
            },
            StyleAvailability {
                style: "Z".to_string(),
                available_sizes: 2,
                total_sizes: Some(0),
                availability_pct: None,
                status: EligibilityStatus::TotalSizesZero,
            },
        ];
        let mut buffer = Vec::new();
        CsvExporter::new(',')
            .unwrap()
            .write_eligibility(&mut buffer, &records)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("X,3,4,0.7500,ELIGIBLE"));
        assert!(text.contains("Z,2,0,,TOTAL_SIZES_ZERO"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allocation.csv");
        CsvExporter::new(',').unwrap().export_allocations(&path, &rows()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("S1,D1,SD1,C1,SC1,MC1,X,E2,L,2\n"));
    }

    #[test]
    fn test_non_ascii_delimiter() {
        assert!(matches!(
            CsvExporter::new('，'),
            Err(ExportError::InvalidDelimiter(_))
        ));
    }
}
