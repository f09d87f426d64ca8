//! # 统一错误处理模块
//!
//! 定义 qepdos 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - `NotFound`: 所需文件不存在或无法读取
//! - `MalformedRow`: PDOS 数据行无法解析为三个数值
//! - `MissingReference`: 缺少 Fermi 能量参考值
//! - `MissingData`: 比较绘图时某一侧数据缺失或为空
//!
//! "未找到 Fermi 能量" 不是错误，由 `Option`/`FermiOutcome::Absent` 表达。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// qepdos 统一错误类型
#[derive(Error, Debug)]
pub enum QepdosError {
    // ─────────────────────────────────────────────────────────────
    // 流水线错误
    // ─────────────────────────────────────────────────────────────
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Malformed PDOS row in {path} at line {line}: '{content}' (expected 3 numeric columns)")]
    MalformedRow {
        path: String,
        line: usize,
        content: String,
    },

    #[error("No Fermi energy available for case '{case}'")]
    MissingReference { case: String },

    #[error("Missing PDOS data for case '{case}' (absent or empty in the energy window)")]
    MissingData { case: String },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid energy window: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    #[error("PDF export failed: {0}")]
    PdfError(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, QepdosError>;
