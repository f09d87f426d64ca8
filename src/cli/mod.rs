//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `fermi`: 批量提取 Fermi 能量
//! - `pdos`: 加载并平移单个算例的 PDOS
//! - `compare`: 两个算例的 PDOS 比较图
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: fermi, pdos, compare

pub mod compare;
pub mod fermi;
pub mod pdos;

use crate::batch::cases::DEFAULT_SCF_OUTPUT;
use crate::batch::CaseLayout;
use crate::parsers::DEFAULT_PDOS_FILE;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// qepdos - Quantum ESPRESSO Fermi 能级与 PDOS 比较工具
#[derive(Parser)]
#[command(name = "qepdos")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Extract Fermi energies from Quantum ESPRESSO logs and compare projected DOS",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Extract Fermi energies from SCF logs and write fermi_energies.txt
    Fermi(fermi::FermiArgs),

    /// Load one case's total PDOS shifted to its Fermi level
    Pdos(pdos::PdosArgs),

    /// Plot the projected DOS of two cases aligned at their Fermi levels
    Compare(compare::CompareArgs),
}

// ─────────────────────────────────────────────────────────────
// 共享参数
// ─────────────────────────────────────────────────────────────

/// 计算根目录与算例内文件名
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Root directory containing one sub-directory per case
    #[arg(short, long, env = "QEPDOS_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// SCF log file name inside each case directory
    #[arg(long, default_value = DEFAULT_SCF_OUTPUT)]
    pub scf_output: String,

    /// Total PDOS file name inside each case directory
    #[arg(long, default_value = DEFAULT_PDOS_FILE)]
    pub pdos_file: String,
}

impl LayoutArgs {
    /// 转换为目录布局
    pub fn layout(&self) -> CaseLayout {
        CaseLayout::new(self.dir.clone())
            .with_scf_output(&self.scf_output)
            .with_pdos_file(&self.pdos_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compare_takes_dir_option_before_cases() {
        let cli = Cli::try_parse_from([
            "qepdos", "compare", "-d", "/calc", "C-STO-00", "C-STO-20", "--emin", "-2", "--pdf",
        ])
        .unwrap();

        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.layout.dir, PathBuf::from("/calc"));
                assert_eq!(args.first, "C-STO-00");
                assert_eq!(args.second, "C-STO-20");
                assert_eq!(args.emin, -2.0);
                assert!(args.pdf);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_pdos_long_dir_option() {
        let cli = Cli::try_parse_from(["qepdos", "pdos", "--dir", "runs", "Si"]).unwrap();
        match cli.command {
            Commands::Pdos(args) => {
                assert_eq!(args.layout.dir, PathBuf::from("runs"));
                assert_eq!(args.case, "Si");
            }
            _ => panic!("expected pdos"),
        }
    }
}
