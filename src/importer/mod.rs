// ==========================================
// 新店铺货系统 - 导入层
// ==========================================
// 职责: 外部表格导入,生成强类型输入快照
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod dataset_loader;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use dataset_loader::{AllocationInputLoader, InputPaths, InputTables, LoadedInputs};
pub use dq_validator::DqValidator;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, RawTable, UniversalFileParser};
