// ==========================================
// 新店铺货系统 - 输入数据集加载器
// ==========================================
// 职责: 五张输入表的解析 → 列校验 → DQ 校验 → 类型转换
// 输出: AllocationInputs + DqReport
// 红线: 任一输入缺失/缺列/非数值/ERROR 级 DQ → 拒绝运行
// ==========================================

use crate::domain::dq::DqReport;
use crate::domain::inputs::AllocationInputs;
use crate::domain::types::Dataset;
use crate::importer::dq_validator::DqValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{RawTable, UniversalFileParser};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

// ==========================================
// InputPaths - 五张输入表的文件路径
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InputPaths {
    pub display_capacity: Option<PathBuf>,
    pub style_master: Option<PathBuf>,
    pub warehouse_stock: Option<PathBuf>,
    pub size_curve: Option<PathBuf>,
    pub size_master: Option<PathBuf>,
}

impl InputPaths {
    pub fn get(&self, dataset: Dataset) -> Option<&PathBuf> {
        match dataset {
            Dataset::DisplayCapacity => self.display_capacity.as_ref(),
            Dataset::StyleMaster => self.style_master.as_ref(),
            Dataset::WarehouseStock => self.warehouse_stock.as_ref(),
            Dataset::SizeCurve => self.size_curve.as_ref(),
            Dataset::StyleSizeMaster => self.size_master.as_ref(),
        }
    }

    /// 取必填路径；缺失即前置条件失败
    pub fn require(&self, dataset: Dataset) -> ImportResult<&PathBuf> {
        self.get(dataset).ok_or(ImportError::MissingInput(dataset))
    }
}

// ==========================================
// InputTables - 五张原始表
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InputTables {
    pub display_capacity: RawTable,
    pub style_master: RawTable,
    pub warehouse_stock: RawTable,
    pub size_curve: RawTable,
    pub size_master: RawTable,
}

impl InputTables {
    pub fn get(&self, dataset: Dataset) -> &RawTable {
        match dataset {
            Dataset::DisplayCapacity => &self.display_capacity,
            Dataset::StyleMaster => &self.style_master,
            Dataset::WarehouseStock => &self.warehouse_stock,
            Dataset::SizeCurve => &self.size_curve,
            Dataset::StyleSizeMaster => &self.size_master,
        }
    }

    fn get_mut(&mut self, dataset: Dataset) -> &mut RawTable {
        match dataset {
            Dataset::DisplayCapacity => &mut self.display_capacity,
            Dataset::StyleMaster => &mut self.style_master,
            Dataset::WarehouseStock => &mut self.warehouse_stock,
            Dataset::SizeCurve => &mut self.size_curve,
            Dataset::StyleSizeMaster => &mut self.size_master,
        }
    }

    pub fn total_rows(&self) -> usize {
        Dataset::all().iter().map(|d| self.get(*d).len()).sum()
    }
}

/// 加载结果
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub inputs: AllocationInputs,
    pub dq_report: DqReport,
}

// ==========================================
// AllocationInputLoader
// ==========================================
pub struct AllocationInputLoader {
    parser: UniversalFileParser,
    mapper: FieldMapper,
    validator: DqValidator,
}

impl AllocationInputLoader {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: FieldMapper,
            validator: DqValidator::new(),
        }
    }

    /// 从文件加载（主入口）
    #[instrument(skip(self, paths))]
    pub fn load_files(&self, paths: &InputPaths) -> ImportResult<LoadedInputs> {
        // 先确认五个输入齐全，再开始解析
        for dataset in Dataset::all() {
            paths.require(dataset)?;
        }

        let mut tables = InputTables::default();
        for dataset in Dataset::all() {
            let path = paths.require(dataset)?;
            let table = self.parser.parse(path)?;
            info!(
                dataset = %dataset,
                path = %path.display(),
                rows = table.len(),
                "输入文件解析完成"
            );
            *tables.get_mut(dataset) = table;
        }

        self.load_tables(&tables)
    }

    /// 从已解析的原始表加载
    ///
    /// # 流程
    /// 1. 必填列校验（任一缺列即失败）
    /// 2. DQ 校验 → DqReport
    /// 3. ERROR 级违规 → 拒绝运行
    /// 4. 类型转换（非数值数量即失败）
    pub fn load_tables(&self, tables: &InputTables) -> ImportResult<LoadedInputs> {
        // === 步骤 1: 必填列校验 ===
        for dataset in Dataset::all() {
            self.mapper.ensure_columns(dataset, tables.get(dataset))?;
        }

        // === 步骤 2: DQ 校验 ===
        let violations = Dataset::all()
            .iter()
            .flat_map(|dataset| self.validator.validate_table(*dataset, tables.get(*dataset)))
            .collect();
        let dq_report = self
            .validator
            .generate_dq_report(tables.total_rows(), violations);

        // === 步骤 3: ERROR 级阻断 ===
        if dq_report.has_errors() {
            let first = dq_report
                .errors()
                .next()
                .map(|v| format!("{} 行 {} 字段 {}: {}", v.dataset, v.row_number, v.field, v.message))
                .unwrap_or_default();
            warn!(blocked = dq_report.summary.blocked, "输入数据质量阻断");
            return Err(ImportError::DqBlocked {
                blocked: dq_report.summary.blocked,
                first,
            });
        }

        if dq_report.summary.warning > 0 || dq_report.summary.conflict > 0 {
            warn!(
                warning = dq_report.summary.warning,
                conflict = dq_report.summary.conflict,
                "输入数据存在 DQ 警告/冲突"
            );
        }

        // === 步骤 4: 类型转换 ===
        let inputs = AllocationInputs {
            display_capacity: self.mapper.map_display_capacity(&tables.display_capacity)?,
            style_master: self.mapper.map_style_master(&tables.style_master)?,
            warehouse_stock: self.mapper.map_warehouse_stock(&tables.warehouse_stock)?,
            size_curve: self.mapper.map_size_curve(&tables.size_curve)?,
            size_master: self.mapper.map_size_master(&tables.size_master)?,
        };

        info!(total_rows = inputs.total_rows(), "输入数据加载完成");

        Ok(LoadedInputs { inputs, dq_report })
    }
}

impl Default for AllocationInputLoader {
    fn default() -> Self {
        Self::new()
    }
}
