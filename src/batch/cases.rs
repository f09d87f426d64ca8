//! # 算例目录布局与发现
//!
//! 将算例名解析为日志/PDOS 文件路径，并在根目录下发现算例子目录。
//!
//! ## 目录约定
//! ```text
//! <root>/
//!   fermi_energies.txt
//!   C-STO-00/scf_output.txt
//!   C-STO-00/VLAB.pdos_tot
//!   C-STO-20/...
//! ```
//!
//! ## 依赖关系
//! - 被 `batch/fermi.rs` 和 `commands/` 使用
//! - 使用 `walkdir` 遍历目录, `glob` 过滤目录名

use crate::error::{QepdosError, Result};
use crate::parsers::DEFAULT_PDOS_FILE;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认 SCF 日志文件名
pub const DEFAULT_SCF_OUTPUT: &str = "scf_output.txt";

/// Fermi 能量汇总文件名
pub const SUMMARY_FILE: &str = "fermi_energies.txt";

/// 算例目录布局：case_id → 文件路径
#[derive(Debug, Clone)]
pub struct CaseLayout {
    /// 计算根目录
    pub root: PathBuf,
    /// 每个算例内的 SCF 日志文件名
    pub scf_output: String,
    /// 每个算例内的总 PDOS 文件名
    pub pdos_file: String,
}

impl CaseLayout {
    /// 使用默认文件名创建布局
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CaseLayout {
            root: root.into(),
            scf_output: DEFAULT_SCF_OUTPUT.to_string(),
            pdos_file: DEFAULT_PDOS_FILE.to_string(),
        }
    }

    pub fn with_scf_output(mut self, name: impl Into<String>) -> Self {
        self.scf_output = name.into();
        self
    }

    pub fn with_pdos_file(mut self, name: impl Into<String>) -> Self {
        self.pdos_file = name.into();
        self
    }

    /// 算例目录
    pub fn case_dir(&self, case_id: &str) -> PathBuf {
        self.root.join(case_id)
    }

    /// 算例的 SCF 日志路径
    pub fn log_path(&self, case_id: &str) -> PathBuf {
        self.case_dir(case_id).join(&self.scf_output)
    }

    /// 算例的总 PDOS 文件路径
    pub fn pdos_path(&self, case_id: &str) -> PathBuf {
        self.case_dir(case_id).join(&self.pdos_file)
    }

    /// Fermi 能量汇总文件路径
    pub fn summary_path(&self) -> PathBuf {
        self.root.join(SUMMARY_FILE)
    }
}

/// 算例发现器
pub struct CaseCollector {
    /// 根目录
    root: PathBuf,
    /// 目录名匹配模式
    pattern: Option<glob::Pattern>,
}

impl CaseCollector {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            pattern: None,
        }
    }

    /// 设置目录名 glob 模式 (e.g. "C-STO-*")
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let compiled = glob::Pattern::new(pattern).map_err(|e| {
            QepdosError::InvalidArgument(format!("invalid case pattern '{}': {}", pattern, e))
        })?;
        self.pattern = Some(compiled);
        Ok(self)
    }

    /// 收集根目录下的直接子目录名，按名称排序
    pub fn collect(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(QepdosError::DirectoryNotFound {
                path: self.root.display().to_string(),
            });
        }

        let mut cases: Vec<String> = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| !name.starts_with('.'))
            .filter(|name| self.matches(name))
            .collect();

        cases.sort();
        Ok(cases)
    }

    fn matches(&self, name: &str) -> bool {
        self.pattern.as_ref().map_or(true, |p| p.matches(name))
    }
}

/// 解析逗号分隔的算例列表，保持给定顺序并去重
pub fn parse_case_list(input: &str) -> Vec<String> {
    let mut cases: Vec<String> = Vec::new();
    for case in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !cases.iter().any(|c| c == case) {
            cases.push(case.to_string());
        }
    }
    cases
}
