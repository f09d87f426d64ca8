//! # 批量 Fermi 能量提取
//!
//! 按给定顺序对每个算例提取 Fermi 能量，汇总成表并写入汇总文件。
//!
//! ## 功能
//! - 单个算例失败不影响其他算例
//! - 每个算例报告 Extracted / NotFound / Absent
//! - 汇总文件每次覆盖写入，顺序与算例顺序一致
//!
//! ## 依赖关系
//! - 被 `commands/fermi.rs`, `commands/compare.rs` 调用
//! - 使用 `parsers/qe_output.rs`
//! - 使用 `batch/cases.rs` 解析路径

use crate::batch::CaseLayout;
use crate::error::{QepdosError, Result};
use crate::models::{FermiOutcome, FermiRecord, FermiTable};
use crate::parsers::extract_fermi_energy;

use std::path::PathBuf;

/// 批量提取结果
#[derive(Debug, Clone)]
pub struct FermiCollection {
    /// 成功提取的算例表
    pub table: FermiTable,
    /// 每个算例的结果，顺序与输入一致
    pub outcomes: Vec<(String, FermiOutcome)>,
    /// 汇总文件路径
    pub summary_path: PathBuf,
}

impl FermiCollection {
    /// 每个算例的记录（含未提取到的）
    pub fn records(&self) -> Vec<FermiRecord> {
        self.outcomes
            .iter()
            .map(|(case, outcome)| FermiRecord::new(case.as_str(), outcome.energy()))
            .collect()
    }

    /// 提取成功的算例数
    pub fn extracted(&self) -> usize {
        self.table.len()
    }
}

/// 对单个算例提取 Fermi 能量
pub fn extract_case(layout: &CaseLayout, case_id: &str) -> FermiOutcome {
    let path = layout.log_path(case_id);
    match extract_fermi_energy(&path) {
        Ok(Some(energy)) => FermiOutcome::Extracted(energy),
        Ok(None) => FermiOutcome::Absent,
        Err(e) => {
            log::debug!("{}: {}", case_id, e);
            FermiOutcome::NotFound(path)
        }
    }
}

/// 批量提取并写入 `<root>/fermi_energies.txt`
///
/// `on_case` 在每个算例处理完后调用，供调用方显示进度。
pub fn collect_fermi_energies<F>(
    layout: &CaseLayout,
    cases: &[String],
    mut on_case: F,
) -> Result<FermiCollection>
where
    F: FnMut(&str, &FermiOutcome),
{
    if !layout.root.is_dir() {
        return Err(QepdosError::DirectoryNotFound {
            path: layout.root.display().to_string(),
        });
    }

    let mut table = FermiTable::new();
    let mut outcomes = Vec::with_capacity(cases.len());

    for case_id in cases {
        let outcome = extract_case(layout, case_id);
        if let FermiOutcome::Extracted(energy) = outcome {
            table.insert(case_id.as_str(), energy);
        }
        on_case(case_id, &outcome);
        outcomes.push((case_id.clone(), outcome));
    }

    let summary_path = layout.summary_path();
    table.write_summary(&summary_path)?;

    log::debug!(
        "wrote {} of {} Fermi energies to {}",
        table.len(),
        cases.len(),
        summary_path.display()
    );

    Ok(FermiCollection {
        table,
        outcomes,
        summary_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, case: &str, content: &str) {
        let case_dir = dir.path().join(case);
        fs::create_dir_all(&case_dir).unwrap();
        fs::write(case_dir.join("scf_output.txt"), content).unwrap();
    }

    fn cases(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partial_success_keeps_case_order() {
        let dir = TempDir::new().unwrap();
        write_log(&dir, "c", "     the Fermi energy is     2.5000 ev\n");
        write_log(&dir, "a", "     the Fermi energy is    -3.1416 ev\n");
        write_log(&dir, "b", "     no Fermi line here\n");

        let layout = CaseLayout::new(dir.path());
        let mut seen = Vec::new();
        let collection =
            collect_fermi_energies(&layout, &cases(&["c", "missing", "b", "a"]), |case, _| {
                seen.push(case.to_string())
            })
            .unwrap();

        assert_eq!(seen, vec!["c", "missing", "b", "a"]);
        assert_eq!(collection.extracted(), 2);
        assert_eq!(collection.outcomes[0].1, FermiOutcome::Extracted(2.5));
        assert_eq!(
            collection.outcomes[1].1,
            FermiOutcome::NotFound(layout.log_path("missing"))
        );
        assert_eq!(collection.outcomes[2].1, FermiOutcome::Absent);

        let summary = fs::read_to_string(dir.path().join("fermi_energies.txt")).unwrap();
        assert_eq!(summary, "c: 2.5 eV\na: -3.1416 eV\n");
    }

    #[test]
    fn test_summary_is_overwritten() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("fermi_energies.txt"), "stale: 1.0 eV\nold: 2.0 eV\n").unwrap();
        write_log(&dir, "x", "the Fermi energy is 0.1250 ev\n");

        let layout = CaseLayout::new(dir.path());
        collect_fermi_energies(&layout, &cases(&["x"]), |_, _| {}).unwrap();

        let table = FermiTable::read_summary(&layout.summary_path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("x"), Some(0.125));
    }

    #[test]
    fn test_all_failures_yield_empty_table() {
        let dir = TempDir::new().unwrap();
        let layout = CaseLayout::new(dir.path());
        let collection =
            collect_fermi_energies(&layout, &cases(&["p", "q"]), |_, _| {}).unwrap();

        assert!(collection.table.is_empty());
        assert_eq!(collection.records()[1], FermiRecord::new("q", None));
        let summary = fs::read_to_string(&collection.summary_path).unwrap();
        assert!(summary.is_empty());
    }
}
