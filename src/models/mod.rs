//! # 数据模型模块
//!
//! 定义 Fermi 能量记录/表和态密度序列的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `batch/`, `plot/` 和 `commands/` 使用
//! - 子模块: fermi, dos

pub mod dos;
pub mod fermi;

pub use dos::{DosSample, DosSeries, EnergyWindow, ShiftedDosSeries};
pub use fermi::{FermiOutcome, FermiRecord, FermiTable};
