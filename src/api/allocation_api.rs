// ==========================================
// 新店铺货系统 - 分配 API
// ==========================================
// 职责: 加载输入 → 分配 → 导出，供命令行/嵌入调用
// 红线: 五个输入缺一不可；输入不合法时不产生任何输出文件
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AllocationConfig;
use crate::domain::dq::DqReport;
use crate::domain::report::AllocationReport;
use crate::engine::orchestrator::{AllocationOrchestrator, AllocationOutcome};
use crate::exporter::{CsvExporter, ExportError};
use crate::importer::{AllocationInputLoader, InputPaths, InputTables, LoadedInputs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// 运行并导出的请求
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub inputs: InputPaths,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub eligibility: Option<PathBuf>,
}

/// 运行并导出的响应
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub output: PathBuf,
    pub report: AllocationReport,
}

/// 输入检查响应（不分配）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub total_rows: usize,
    pub stores: usize,
    pub eligible_styles: usize,
    pub ineligible_styles: usize,
    pub dq_report: DqReport,
}

// ==========================================
// AllocationApi
// ==========================================
pub struct AllocationApi {
    loader: AllocationInputLoader,
    orchestrator: AllocationOrchestrator,
    exporter: CsvExporter,
}

impl AllocationApi {
    pub fn new(config: AllocationConfig) -> ApiResult<Self> {
        let exporter = CsvExporter::new(config.output_delimiter)?;
        Ok(Self {
            loader: AllocationInputLoader::new(),
            orchestrator: AllocationOrchestrator::new(config),
            exporter,
        })
    }

    pub fn config(&self) -> &AllocationConfig {
        self.orchestrator.config()
    }

    /// 从文件加载并分配（不导出）
    pub fn run_allocation(&self, paths: &InputPaths) -> ApiResult<AllocationOutcome> {
        let loaded = self.loader.load_files(paths)?;
        Ok(self.allocate(loaded))
    }

    /// 从已解析的原始表分配
    pub fn run_tables(&self, tables: &InputTables) -> ApiResult<AllocationOutcome> {
        let loaded = self.loader.load_tables(tables)?;
        Ok(self.allocate(loaded))
    }

    fn allocate(&self, loaded: LoadedInputs) -> AllocationOutcome {
        let mut outcome = self.orchestrator.run(&loaded.inputs);
        outcome.report.dq_summary = Some(loaded.dq_report.summary);
        outcome
    }

    /// 分配并导出结果 / 报告 / 尺码齐全度表
    ///
    /// 所有输出先写入同目录的暂存文件，全部写成功后再改名为目标文件；
    /// 任一写出失败时删除暂存文件，目标路径上不留下本次运行的部分输出
    #[instrument(skip(self, request), fields(output = %request.output.display()))]
    pub fn run_and_export(&self, request: &RunRequest) -> ApiResult<RunResponse> {
        let outcome = self.run_allocation(&request.inputs)?;

        let mut staged = Vec::new();
        if let Err(err) = self.write_staged(request, &outcome, &mut staged) {
            discard_staged(&staged);
            return Err(err);
        }

        for (idx, output) in staged.iter().enumerate() {
            if let Err(e) = std::fs::rename(&output.staging, &output.target) {
                discard_staged(&staged[idx..]);
                return Err(ExportError::Create {
                    path: output.target.display().to_string(),
                    source: e,
                }
                .into());
            }
        }
        info!(files = staged.len(), "输出文件写出完成");

        Ok(RunResponse {
            output: request.output.clone(),
            report: outcome.report,
        })
    }

    fn write_staged(
        &self,
        request: &RunRequest,
        outcome: &AllocationOutcome,
        staged: &mut Vec<StagedOutput>,
    ) -> ApiResult<()> {
        let output = StagedOutput::new(&request.output);
        staged.push(output.clone());
        self.exporter
            .export_allocations(&output.staging, &outcome.rows)?;

        if let Some(path) = &request.eligibility {
            let output = StagedOutput::new(path);
            staged.push(output.clone());
            self.exporter
                .export_eligibility(&output.staging, &outcome.report.availability)?;
        }

        if let Some(path) = &request.report {
            let output = StagedOutput::new(path);
            staged.push(output.clone());
            let json = outcome
                .report
                .to_json_pretty()
                .map_err(|e| ApiError::ReportError(e.to_string()))?;
            std::fs::write(&output.staging, json)
                .map_err(|e| ApiError::ReportError(format!("{}: {}", path.display(), e)))?;
        }

        Ok(())
    }

    /// 结果表文本（与导出文件内容一致）
    pub fn render_rows(&self, outcome: &AllocationOutcome) -> ApiResult<String> {
        Ok(self.exporter.allocations_to_string(&outcome.rows)?)
    }

    /// 输入检查：加载 + DQ + 准入统计
    #[instrument(skip(self, paths))]
    pub fn check(&self, paths: &InputPaths) -> ApiResult<CheckResponse> {
        let loaded = self.loader.load_files(paths)?;
        let eligibility = self.orchestrator.evaluate_eligibility(&loaded.inputs);

        Ok(CheckResponse {
            total_rows: loaded.inputs.total_rows(),
            stores: loaded.inputs.stores().len(),
            eligible_styles: eligibility.eligible_count(),
            ineligible_styles: eligibility.ineligible_count(),
            dq_report: loaded.dq_report,
        })
    }
}

/// 暂存文件 → 目标文件
#[derive(Debug, Clone)]
struct StagedOutput {
    staging: PathBuf,
    target: PathBuf,
}

impl StagedOutput {
    fn new(target: &Path) -> Self {
        let mut name = target.as_os_str().to_os_string();
        name.push(".partial");
        Self {
            staging: PathBuf::from(name),
            target: target.to_path_buf(),
        }
    }
}

fn discard_staged(staged: &[StagedOutput]) {
    for output in staged {
        if output.staging.exists() {
            if let Err(e) = std::fs::remove_file(&output.staging) {
                warn!(path = %output.staging.display(), error = %e, "暂存文件清理失败");
            }
        }
    }
}
