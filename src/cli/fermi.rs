//! # fermi 子命令 CLI 定义
//!
//! 批量提取各算例 SCF 日志中的 Fermi 能量。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fermi.rs`

use super::LayoutArgs;
use clap::Args;

/// fermi 子命令参数
#[derive(Args, Debug)]
pub struct FermiArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Comma-separated case directories, processed in the given order
    #[arg(long, conflicts_with = "pattern")]
    pub cases: Option<String>,

    /// Glob pattern on case directory names when discovering cases (e.g. "C-STO-*")
    #[arg(long)]
    pub pattern: Option<String>,
}
