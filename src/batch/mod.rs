//! # 批量处理模块
//!
//! 对一组算例执行 Fermi 能量提取。
//!
//! ## 功能
//! - 算例目录布局与路径解析
//! - 算例自动发现（目录名 glob 过滤）
//! - 按算例顺序提取并汇总 Fermi 能量
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `parsers/qe_output.rs`
//! - 使用 `walkdir` 遍历目录

pub mod cases;
pub mod fermi;

pub use cases::{parse_case_list, CaseCollector, CaseLayout};
pub use fermi::{collect_fermi_energies, FermiCollection};
