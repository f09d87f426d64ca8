//! # PDOS 比较绘图模块
//!
//! 构建两个算例的 PDOS 比较图，交付给显示面，并可选导出 PDF。
//!
//! ## 子模块
//! - `comparison`: 窗口过滤与后端无关的图表描述
//! - `surface`: 显示面接口与 PNG/SVG 实现 (plotters)
//! - `pdf`: 单页矢量 PDF 导出 (printpdf)
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs` 使用
//! - 使用 `models/dos.rs`

pub mod comparison;
pub mod pdf;
pub mod surface;

pub use comparison::ComparisonPlot;
pub use surface::{DisplaySurface, ImageSurface};

use crate::error::Result;
use std::path::{Path, PathBuf};

/// 一次渲染的结果
#[derive(Debug)]
pub struct RenderReport {
    /// PDF 导出结果；未请求导出时为 None
    pub export: Option<Result<PathBuf>>,
}

/// 交付比较图；`export_dir` 给出时额外导出 `<export_dir>/projected_dos.pdf`
///
/// 显示失败直接返回错误；导出失败记录在报告中，不影响已完成的显示。
pub fn render_comparison(
    plot: &ComparisonPlot,
    surface: &mut dyn DisplaySurface,
    export_dir: Option<&Path>,
) -> Result<RenderReport> {
    surface.show(plot)?;

    let export = export_dir.map(|dir| pdf::export_pdf(plot, dir));
    if let Some(Err(e)) = &export {
        log::debug!("PDF export failed: {}", e);
    }

    Ok(RenderReport { export })
}
