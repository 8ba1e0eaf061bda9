// ==========================================
// 文件输入 → 分配 → 文件输出 端到端测试
// ==========================================
// 测试目标: 验证 AllocationApi 的完整文件流程
// 覆盖范围: CSV 导入、导出字节一致、运行报告、输入不合法时拒绝运行
// ==========================================

mod helpers;

use helpers::{hierarchy, ScenarioBuilder};
use std::fs;
use store_allocation::api::{AllocationApi, ApiError, RunRequest};
use store_allocation::config::AllocationConfig;
use store_allocation::domain::{AllocationReport, Dataset};
use store_allocation::engine::AllocationPolicy;
use store_allocation::importer::ImportError;
use tempfile::TempDir;

// ==========================================
// 测试辅助函数
// ==========================================

fn scenario() -> ScenarioBuilder {
    let tee = hierarchy("MC-TEE");
    let polo = hierarchy("MC-POLO");
    ScenarioBuilder::new()
        .capacity("S1", &tee, 10)
        .capacity("S1", &polo, 4)
        .capacity("S2", &tee, 5)
        .curve(&tee, &[("M", 3), ("L", 2)])
        .style("X", &tee, &[("M", 8), ("L", 8)], 2)
        .style("Y", &tee, &[("M", 8), ("L", 8)], 2)
        .style("Z", &tee, &[("M", 8), ("L", 8)], 2)
        .style("HALF", &tee, &[("M", 8), ("L", 0)], 2)
}

fn request(dir: &TempDir, builder: &ScenarioBuilder) -> RunRequest {
    RunRequest {
        inputs: builder.write_csv(dir.path()),
        output: dir.path().join("allocation_output.csv"),
        report: Some(dir.path().join("report.json")),
        eligibility: Some(dir.path().join("eligibility.csv")),
    }
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_set_based_csv_round() {
    let dir = tempfile::tempdir().unwrap();
    let request = request(&dir, &scenario());

    let api = AllocationApi::new(AllocationConfig::default()).unwrap();
    let response = api.run_and_export(&request).unwrap();

    let output = fs::read_to_string(&request.output).unwrap();
    assert_eq!(
        output,
        "Store,Dept,SubDept,Class,SubClass,MC,Style,EAN,Size,AllocatedQty\n\
         S1,WOMEN,TOPS,KNIT,TEE,MC-TEE,X,X-M,M,3\n\
         S1,WOMEN,TOPS,KNIT,TEE,MC-TEE,X,X-L,L,2\n\
         S1,WOMEN,TOPS,KNIT,TEE,MC-TEE,Y,Y-M,M,3\n\
         S1,WOMEN,TOPS,KNIT,TEE,MC-TEE,Y,Y-L,L,2\n\
         S2,WOMEN,TOPS,KNIT,TEE,MC-TEE,X,X-M,M,3\n\
         S2,WOMEN,TOPS,KNIT,TEE,MC-TEE,X,X-L,L,2\n"
    );

    assert_eq!(response.report.counts.stores, 2);
    assert_eq!(response.report.counts.allocated_units, 15);
    assert_eq!(response.report.counts.eligible_styles, 3);
    assert_eq!(response.report.counts.ineligible_styles, 1);
    assert_eq!(response.report.dq_summary.as_ref().unwrap().blocked, 0);

    // 运行报告可回读
    let report: AllocationReport =
        serde_json::from_str(&fs::read_to_string(request.report.as_ref().unwrap()).unwrap())
            .unwrap();
    assert_eq!(report.run_id, response.report.run_id);
    assert_eq!(report.policy, "set_based");

    let eligibility = fs::read_to_string(request.eligibility.as_ref().unwrap()).unwrap();
    assert!(eligibility.starts_with("Style,Available_Sizes,TotalSizes,Availability_%,Status\n"));
    assert!(eligibility.contains("HALF,1,2,0.5000,BELOW_THRESHOLD"));
}

#[test]
fn test_exports_are_byte_identical_across_runs() {
    for policy in [AllocationPolicy::SetBased, AllocationPolicy::ScaledFullSet] {
        let dir = tempfile::tempdir().unwrap();
        let builder = scenario();
        let first = request(&dir, &builder);
        let second = RunRequest {
            output: dir.path().join("allocation_output_2.csv"),
            ..first.clone()
        };

        let api = AllocationApi::new(AllocationConfig {
            policy,
            ..Default::default()
        })
        .unwrap();
        api.run_and_export(&first).unwrap();
        api.run_and_export(&second).unwrap();

        assert_eq!(
            fs::read(&first.output).unwrap(),
            fs::read(&second.output).unwrap()
        );
    }
}

#[test]
fn test_scaled_full_set_csv_keeps_zero_rows() {
    let dir = tempfile::tempdir().unwrap();
    let request = request(&dir, &scenario());

    let api = AllocationApi::new(AllocationConfig {
        policy: AllocationPolicy::ScaledFullSet,
        ..Default::default()
    })
    .unwrap();
    api.run_and_export(&request).unwrap();

    let output = fs::read_to_string(&request.output).unwrap();
    let lines: Vec<&str> = output.lines().skip(1).collect();
    // 2 家门店 × 3 个准入款式 × 2 尺码
    assert_eq!(lines.len(), 12);
    // S1: dc_value = 10 → 2 套 → M:6 L:4
    assert!(lines.contains(&"S1,WOMEN,TOPS,KNIT,TEE,MC-TEE,Z,Z-M,M,6"));
    assert!(lines.contains(&"S1,WOMEN,TOPS,KNIT,TEE,MC-TEE,Z,Z-L,L,4"));
    // S2: dc_value = 5 → 1 套
    assert!(lines.contains(&"S2,WOMEN,TOPS,KNIT,TEE,MC-TEE,X,X-M,M,3"));
}

#[test]
fn test_missing_column_refuses_to_run_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let request = request(&dir, &scenario());
    fs::write(
        request.inputs.warehouse_stock.as_ref().unwrap(),
        "EAN,Qty\nX-M,8\n",
    )
    .unwrap();

    let err = AllocationApi::new(AllocationConfig::default())
        .unwrap()
        .run_and_export(&request)
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Import(ImportError::MissingColumn {
            dataset: Dataset::WarehouseStock,
            ..
        })
    ));
    assert!(err.to_string().contains("WH_Qty"));
    assert!(!request.output.exists());
    assert!(!request.report.as_ref().unwrap().exists());
}

#[test]
fn test_fractional_quantity_refuses_to_run() {
    let dir = tempfile::tempdir().unwrap();
    let request = request(&dir, &scenario());
    fs::write(
        request.inputs.size_curve.as_ref().unwrap(),
        "Dept,SubDept,Class,SubClass,MC,Size,CurveQty\nWOMEN,TOPS,KNIT,TEE,MC-TEE,M,2.5\n",
    )
    .unwrap();

    let err = AllocationApi::new(AllocationConfig::default())
        .unwrap()
        .run_and_export(&request)
        .unwrap_err();
    assert!(err.is_precondition_failure());
    assert!(!request.output.exists());
}

#[test]
fn test_missing_input_file_is_a_precondition_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = request(&dir, &scenario());
    request.inputs.size_master = None;

    let err = AllocationApi::new(AllocationConfig::default())
        .unwrap()
        .run_and_export(&request)
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Import(ImportError::MissingInput(Dataset::StyleSizeMaster))
    ));
}

#[test]
fn test_check_reports_dq_and_eligibility() {
    let dir = tempfile::tempdir().unwrap();
    let paths = scenario().write_csv(dir.path());
    // 重复库存 EAN → 冲突（合计后继续）
    fs::write(
        paths.warehouse_stock.as_ref().unwrap(),
        "EAN,WH_Qty\nX-M,8\nX-M,1\nX-L,8\nY-M,8\nY-L,8\nZ-M,8\nZ-L,8\nHALF-M,8\n",
    )
    .unwrap();

    let response = AllocationApi::new(AllocationConfig::default())
        .unwrap()
        .check(&paths)
        .unwrap();

    assert_eq!(response.stores, 2);
    assert_eq!(response.eligible_styles, 3);
    assert_eq!(response.ineligible_styles, 1);
    assert_eq!(response.dq_report.summary.blocked, 0);
    assert!(response.dq_report.summary.conflict >= 1);
}
