// ==========================================
// 新店铺货系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: RawTable（表头 + 行记录 HashMap<列名, 值>）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ==========================================
// RawTable - 原始表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: usize, // 原始文件行号（1 基，与表格软件显示一致）
    pub values: HashMap<String, String>,
}

impl RawRow {
    /// 取字段值（已 TRIM）；列不存在时返回空串
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

impl RawTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Reader 解析（供内存数据/测试复用）
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头（去除 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            // csv 跳过空行，行号取记录在源文件中的实际位置
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_idx + 2);
            let mut values = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    values.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if values.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(RawRow { row_number, values });
        }

        Ok(RawTable { headers, rows })
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        if let Some(ext) = file_path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel Parser 实现（读取第一个工作表）
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;
        // 工作表有效区域不一定从 A1 开始（0 基行号）
        let header_offset = range.start().map(|(row, _)| row as usize).unwrap_or(0);

        // 提取表头（第一行）
        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (row_idx, data_row) in sheet_rows.enumerate() {
            let mut values = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    values.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if values.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(RawRow {
                row_number: header_offset + row_idx + 2,
                values,
            });
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_table(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::field_mapper::FieldMapper;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_csv_parser_trims_and_numbers_rows() {
        let data = "\u{feff}EAN , WH_Qty\n E1 , 5 \n\nE2,0\n";
        let table = CsvParser.parse_reader(data.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["EAN", "WH_Qty"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("EAN"), "E1");
        assert_eq!(table.rows[0].get("WH_Qty"), "5");
        assert_eq!(table.rows[0].row_number, 2);
        assert_eq!(table.rows[1].get("EAN"), "E2");
        // 空行之后的记录保留源文件行号
        assert_eq!(table.rows[1].row_number, 4);
    }

    #[test]
    fn test_type_error_after_blank_line_names_source_line() {
        let table = CsvParser
            .parse_reader("EAN,WH_Qty\nE1,5\n\nE2,abc\n".as_bytes())
            .unwrap();
        let err = FieldMapper.map_warehouse_stock(&table).unwrap_err();

        assert!(matches!(err, ImportError::TypeConversionError { row: 4, .. }));
    }

    #[test]
    fn test_excel_parser_reads_first_sheet() {
        let path =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/warehouse_stock.xlsx");
        let table = UniversalFileParser.parse(&path).unwrap();

        // 表头在第 2 行，首个工作表 Stock；第二个工作表不参与解析
        assert_eq!(table.headers, vec!["EAN", "WH_Qty"]);
        assert_eq!(table.len(), 2);

        // 数值单元格: 大整数 EAN 不带小数/科学计数，12.0 → "12"
        assert_eq!(table.rows[0].get("EAN"), "6901234567890");
        assert_eq!(table.rows[0].get("WH_Qty"), "12");
        assert_eq!(table.rows[0].row_number, 3);

        // 第 4 行为空行，跳过后行号不前移
        assert_eq!(table.rows[1].get("EAN"), "E-2");
        assert_eq!(table.rows[1].row_number, 5);

        let stock = FieldMapper.map_warehouse_stock(&table).unwrap();
        assert_eq!(stock[0].wh_qty, 12);
        assert_eq!(stock[1].wh_qty, 3);
    }

    #[test]
    fn test_csv_parser_header_only() {
        let table = CsvParser.parse_reader("Style,TotalSizes\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.has_column("TotalSizes"));
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "Style,TotalSizes").unwrap();
        writeln!(temp_file, "ST1,4").unwrap();

        let table = UniversalFileParser.parse(temp_file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get("Style"), "ST1");
    }

    #[test]
    fn test_file_not_found() {
        let result = CsvParser.parse_to_raw_table(Path::new("/nonexistent/input.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_format() {
        let temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.parse(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
