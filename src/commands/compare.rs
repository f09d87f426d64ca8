//! # compare 命令实现
//!
//! 两个算例的 PDOS 比较：提取 Fermi 能量 → 加载并平移 PDOS → 绘图 → 可选导出 PDF。
//!
//! ## 功能
//! - 每次运行都重新提取两个算例的 Fermi 能量并更新汇总文件
//! - 单侧加载失败先逐一报告，随后比较以 MissingData 终止
//! - PDF 导出失败单独报告，不影响已生成的图片
//!
//! ## 依赖关系
//! - 使用 `cli/compare.rs` 定义的参数
//! - 使用 `commands/fermi.rs` 的批量提取
//! - 使用 `parsers/pdos.rs`, `plot/`

use crate::batch::CaseLayout;
use crate::cli::compare::CompareArgs;
use crate::commands::fermi::run_collection;
use crate::error::Result;
use crate::models::{EnergyWindow, FermiTable, ShiftedDosSeries};
use crate::parsers::load_pdos;
use crate::plot::{render_comparison, ComparisonPlot, ImageSurface};
use crate::utils::output;

/// 默认显示面图片名
pub const DEFAULT_IMAGE_FILE: &str = "projected_dos.png";

/// 执行 compare 命令
pub fn execute(args: CompareArgs) -> Result<()> {
    output::print_header("Projected DOS Comparison");

    let window = EnergyWindow::new(args.emin, args.emax)?;
    let layout = args.layout.layout();

    let cases = vec![args.first.clone(), args.second.clone()];
    let collection = run_collection(&layout, &cases)?;

    let plot = prepare_comparison(
        &layout,
        &collection.table,
        (args.first.as_str(), args.second.as_str()),
        window,
    )?;

    let image_path = args
        .output
        .clone()
        .unwrap_or_else(|| layout.root.join(DEFAULT_IMAGE_FILE));
    let mut surface = ImageSurface::new(image_path, args.width, args.height);

    let export_dir = args.pdf.then_some(layout.root.as_path());
    let report = render_comparison(&plot, &mut surface, export_dir)?;

    output::print_success(&format!(
        "PDOS plot generated: '{}'",
        surface.path().display()
    ));

    match report.export {
        Some(Ok(path)) => output::print_success(&format!("Plot saved as {}", path.display())),
        Some(Err(e)) => output::print_error(&format!("PDF export failed: {}", e)),
        None => {}
    }

    Ok(())
}

/// 加载两个算例的 PDOS 并构建比较图
///
/// 单侧加载失败（缺少 Fermi 能量、文件不存在、格式错误）先报告，
/// 然后由 `ComparisonPlot::new` 以 `MissingData` 终止，不会生成单侧图。
pub fn prepare_comparison(
    layout: &CaseLayout,
    table: &FermiTable,
    (first, second): (&str, &str),
    window: EnergyWindow,
) -> Result<ComparisonPlot> {
    let first_series = load_case(layout, table, first);
    let second_series = load_case(layout, table, second);

    ComparisonPlot::new(
        (first, first_series.as_ref()),
        (second, second_series.as_ref()),
        window,
    )
}

fn load_case(layout: &CaseLayout, table: &FermiTable, case_id: &str) -> Option<ShiftedDosSeries> {
    match load_pdos(&layout.root, case_id, table.get(case_id), &layout.pdos_file) {
        Ok(series) => Some(series),
        Err(e) => {
            output::print_warning(&format!("{}: {}", case_id, e));
            None
        }
    }
}
