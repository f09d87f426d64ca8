//! # pdos 子命令 CLI 定义
//!
//! 加载单个算例的总 PDOS，并以其 Fermi 能量为零点平移。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/pdos.rs`

use super::LayoutArgs;
use clap::Args;
use std::path::PathBuf;

/// pdos 子命令参数
#[derive(Args, Debug)]
pub struct PdosArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Case directory name
    pub case: String,

    /// Fermi energy in eV (default: read from fermi_energies.txt)
    #[arg(long, allow_negative_numbers = true)]
    pub fermi: Option<f64>,

    /// Write the shifted series to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
