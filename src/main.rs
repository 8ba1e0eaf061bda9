// ==========================================
// 新店铺货系统 - 命令行入口
// ==========================================
// 子命令: run（分配并导出） / check（仅加载与校验输入）
// ==========================================

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use store_allocation::api::{AllocationApi, RunRequest};
use store_allocation::config::{ConfigManager, ConfigOverrides};
use store_allocation::engine::{AllocationPolicy, StyleOrder};
use store_allocation::importer::InputPaths;
use store_allocation::{logging, APP_NAME, VERSION};

#[derive(Parser, Debug)]
#[command(name = "store-allocation", version, about = "新店铺货系统 - 基于尺码曲线的首铺分配")]
struct Cli {
    /// 配置文件（默认查找 $STORE_ALLOCATION_CONFIG 与用户配置目录）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 执行分配并导出结果
    Run(RunArgs),
    /// 加载并校验输入，输出数据质量与准入统计
    Check(InputArgs),
}

/// 五张输入表
#[derive(Args, Debug)]
struct InputArgs {
    /// 门店陈列容量 (Store, Dept, SubDept, Class, SubClass, MC, DisplayCapacity)
    #[arg(long, value_name = "FILE")]
    display_capacity: PathBuf,

    /// 款式主档 (Style, EAN, Dept, SubDept, Class, SubClass, MC, Size)
    #[arg(long, value_name = "FILE")]
    style_master: PathBuf,

    /// 仓库库存 (EAN, WH_Qty)
    #[arg(long, value_name = "FILE")]
    warehouse_stock: PathBuf,

    /// 尺码曲线 (Dept, SubDept, Class, SubClass, MC, Size, CurveQty)
    #[arg(long, value_name = "FILE")]
    size_curve: PathBuf,

    /// 款式尺码主档 (Style, TotalSizes)
    #[arg(long, value_name = "FILE")]
    size_master: PathBuf,
}

impl InputArgs {
    fn to_paths(&self) -> InputPaths {
        InputPaths {
            display_capacity: Some(self.display_capacity.clone()),
            style_master: Some(self.style_master.clone()),
            warehouse_stock: Some(self.warehouse_stock.clone()),
            size_curve: Some(self.size_curve.clone()),
            size_master: Some(self.size_master.clone()),
        }
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// 分配结果输出文件
    #[arg(long, short = 'o', value_name = "FILE", default_value = "allocation_output.csv")]
    output: PathBuf,

    /// 分配策略: set_based | scaled_full_set
    #[arg(long, short = 'p')]
    policy: Option<AllocationPolicy>,

    /// 款式顺序: input_order | style_id
    #[arg(long)]
    style_order: Option<StyleOrder>,

    /// 按门店并行计算
    #[arg(long)]
    parallel: bool,

    /// 导出分隔符
    #[arg(long, short = 'd')]
    delimiter: Option<char>,

    /// 运行报告 (JSON)
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// 尺码齐全度表 (CSV)
    #[arg(long, value_name = "FILE")]
    eligibility: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }
    tracing::info!("{} v{}", APP_NAME, VERSION);

    match cli.command {
        Commands::Run(args) => run(cli.config, args),
        Commands::Check(args) => check(cli.config, args),
    }
}

fn run(config_path: Option<PathBuf>, args: RunArgs) -> Result<()> {
    let mut manager = ConfigManager::load(config_path.as_deref()).context("加载配置失败")?;
    manager.apply_overrides(&ConfigOverrides {
        policy: args.policy,
        style_order: args.style_order,
        parallel_stores: args.parallel.then_some(true),
        output_delimiter: args.delimiter,
    })?;

    let api = AllocationApi::new(manager.into_config())?;
    let request = RunRequest {
        inputs: args.inputs.to_paths(),
        output: args.output,
        report: args.report,
        eligibility: args.eligibility,
    };
    let response = api
        .run_and_export(&request)
        .context("分配运行失败，未生成输出")?;

    let counts = &response.report.counts;
    println!("分配完成: run_id={}", response.report.run_id);
    println!(
        "  策略: {} ({}), 款式顺序: {}",
        api.config().policy.title_cn(),
        api.config().policy,
        api.config().style_order
    );
    println!(
        "  门店: {}, 准入款式: {}, 未准入款式: {}",
        counts.stores, counts.eligible_styles, counts.ineligible_styles
    );
    println!(
        "  分配行: {}, 分配件数: {}, 跳过记录: {}",
        counts.allocation_rows, counts.allocated_units, counts.skipped
    );
    println!("  输出文件: {}", response.output.display());

    Ok(())
}

fn check(config_path: Option<PathBuf>, args: InputArgs) -> Result<()> {
    let manager = ConfigManager::load(config_path.as_deref()).context("加载配置失败")?;
    let api = AllocationApi::new(manager.into_config())?;
    let response = api.check(&args.to_paths()).context("输入检查失败")?;

    let summary = &response.dq_report.summary;
    println!("输入检查通过: 共 {} 行, 门店 {} 家", response.total_rows, response.stores);
    println!(
        "  DQ: 阻断 {}, 警告 {}, 冲突 {}, 提示 {}",
        summary.blocked, summary.warning, summary.conflict, summary.info
    );
    for violation in &response.dq_report.violations {
        println!(
            "    [{:?}] {} 行 {} {}: {}",
            violation.level, violation.dataset, violation.row_number, violation.field, violation.message
        );
    }
    println!(
        "  准入款式: {}, 未准入款式: {}",
        response.eligible_styles, response.ineligible_styles
    );

    Ok(())
}
