//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，并把结构化结果渲染为终端输出。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `parsers/`, `plot/`, `utils/`
//! - 子模块: fermi, pdos, compare

pub mod compare;
pub mod fermi;
pub mod pdos;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Fermi(args) => fermi::execute(args),
        Commands::Pdos(args) => pdos::execute(args),
        Commands::Compare(args) => compare::execute(args),
    }
}
