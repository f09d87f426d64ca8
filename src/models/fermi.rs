//! # Fermi 能量数据模型
//!
//! 存储单个算例的 Fermi 能量提取结果，以及按算例顺序排列的 Fermi 能量表。
//!
//! ## 汇总文件格式
//! ```text
//! C-STO-00: -3.1416 eV
//! C-STO-20: 5.0 eV
//! ```
//!
//! ## 依赖关系
//! - 被 `batch/fermi.rs` 生成
//! - 被 `parsers/pdos.rs`, `commands/` 使用

use crate::error::{QepdosError, Result};

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// 单个算例的 Fermi 能量记录
#[derive(Debug, Clone, PartialEq)]
pub struct FermiRecord {
    /// 算例名称（目录名）
    pub case_id: String,

    /// Fermi 能量 (eV)，日志中无匹配行时为 None
    pub energy_ev: Option<f64>,
}

impl FermiRecord {
    pub fn new(case_id: impl Into<String>, energy_ev: Option<f64>) -> Self {
        FermiRecord {
            case_id: case_id.into(),
            energy_ev,
        }
    }
}

/// 单个算例的提取结果
#[derive(Debug, Clone, PartialEq)]
pub enum FermiOutcome {
    /// 成功提取
    Extracted(f64),
    /// 日志文件不存在或不可读
    NotFound(PathBuf),
    /// 日志可读但没有 Fermi 能量行
    Absent,
}

impl FermiOutcome {
    /// 提取到的能量值
    pub fn energy(&self) -> Option<f64> {
        match self {
            FermiOutcome::Extracted(e) => Some(*e),
            _ => None,
        }
    }
}

/// Fermi 能量表：case_id → energy_eV，保持插入顺序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FermiTable {
    entries: Vec<(String, f64)>,
}

impl FermiTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入一条记录；同名算例覆盖旧值但保留原位置
    pub fn insert(&mut self, case_id: impl Into<String>, energy_ev: f64) {
        let case_id = case_id.into();
        match self.entries.iter_mut().find(|(c, _)| *c == case_id) {
            Some(entry) => entry.1 = energy_ev,
            None => self.entries.push((case_id, energy_ev)),
        }
    }

    /// 按算例名查询
    pub fn get(&self, case_id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == case_id)
            .map(|(_, e)| *e)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(c, e)| (c.as_str(), *e))
    }

    /// 生成汇总文件内容，每行 `<case_id>: <energy> eV`
    pub fn to_summary_string(&self) -> String {
        let mut out = String::new();
        for (case_id, energy) in self.iter() {
            let _ = writeln!(out, "{}: {} eV", case_id, format_energy(energy));
        }
        out
    }

    /// 写入汇总文件（覆盖已有文件）
    pub fn write_summary(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_summary_string()).map_err(|e| QepdosError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// 读取汇总文件
    pub fn read_summary(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(QepdosError::NotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| QepdosError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse_summary(&content)
    }

    /// 从字符串内容解析汇总文件
    pub fn parse_summary(content: &str) -> Result<Self> {
        let mut table = FermiTable::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let parsed = line.rsplit_once(':').and_then(|(case_id, rest)| {
                let value = rest.trim().strip_suffix("eV")?.trim();
                let energy = value.parse::<f64>().ok()?;
                let case_id = case_id.trim();
                (!case_id.is_empty()).then(|| (case_id.to_string(), energy))
            });

            match parsed {
                Some((case_id, energy)) => table.insert(case_id, energy),
                None => {
                    return Err(QepdosError::InvalidArgument(format!(
                        "malformed Fermi summary line {}: '{}'",
                        idx + 1,
                        raw
                    )))
                }
            }
        }

        Ok(table)
    }
}

/// 十进制定点格式，总带小数部分 (5.0, 1e16 → 10000000000000000.0)
fn format_energy(energy: f64) -> String {
    let s = energy.to_string();
    if s.contains('.') || !energy.is_finite() {
        s
    } else {
        format!("{}.0", s)
    }
}
