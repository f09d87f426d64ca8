//! # 解析器模块
//!
//! 提供 Quantum ESPRESSO 输出文件的解析器。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: qe_output (pw.x 日志), pdos (projwfc.x 总 PDOS)

pub mod pdos;
pub mod qe_output;

pub use pdos::{load_pdos, DEFAULT_PDOS_FILE};
pub use qe_output::extract_fermi_energy;
