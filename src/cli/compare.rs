//! # compare 子命令 CLI 定义
//!
//! 对齐两个算例的 Fermi 能级并绘制 PDOS 比较图。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/compare.rs`

use super::LayoutArgs;
use clap::Args;
use std::path::PathBuf;

/// compare 子命令参数
#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// First case (drawn dashed)
    pub first: String,

    /// Second case (drawn solid)
    pub second: String,

    /// Lower bound of the energy window, in eV relative to E_F
    #[arg(long, default_value_t = -4.0, allow_negative_numbers = true)]
    pub emin: f64,

    /// Upper bound of the energy window, in eV relative to E_F
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    pub emax: f64,

    /// Also export the plot to <DIR>/projected_dos.pdf
    #[arg(long, default_value_t = false)]
    pub pdf: bool,

    /// Image file for the rendered plot, PNG or SVG (default: <DIR>/projected_dos.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 750)]
    pub height: u32,
}
