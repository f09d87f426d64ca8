//! # fermi 命令实现
//!
//! 批量提取 Fermi 能量并写入 `fermi_energies.txt`。
//!
//! ## 功能
//! - 显式算例列表或自动发现（可 glob 过滤）
//! - 逐算例报告提取结果，单个失败不影响其他算例
//! - 终端表格汇总
//!
//! ## 依赖关系
//! - 使用 `cli/fermi.rs` 定义的参数
//! - 使用 `batch/` 提取与发现算例
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::{
    collect_fermi_energies, parse_case_list, CaseCollector, CaseLayout, FermiCollection,
};
use crate::cli::fermi::FermiArgs;
use crate::error::{QepdosError, Result};
use crate::models::FermiOutcome;
use crate::utils::{output, progress};

use tabled::{Table, Tabled};

/// 汇总表行
#[derive(Debug, Clone, Tabled)]
struct FermiRow {
    #[tabled(rename = "Case")]
    case: String,
    #[tabled(rename = "Fermi Energy (eV)")]
    energy: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// 执行 fermi 命令
pub fn execute(args: FermiArgs) -> Result<()> {
    output::print_header("Extracting Fermi Energies");

    let layout = args.layout.layout();
    if !layout.root.is_dir() {
        return Err(QepdosError::DirectoryNotFound {
            path: layout.root.display().to_string(),
        });
    }

    let cases = resolve_cases(&layout, args.cases.as_deref(), args.pattern.as_deref())?;
    if cases.is_empty() {
        output::print_warning(&format!(
            "No case directories found in '{}'",
            layout.root.display()
        ));
        return Ok(());
    }

    output::print_info(&format!(
        "Scanning {} cases for '{}'...",
        cases.len(),
        layout.scf_output
    ));

    let collection = run_collection(&layout, &cases)?;

    output::print_separator();
    println!("{}", Table::new(summary_rows(&collection)));

    if collection.table.is_empty() {
        output::print_warning("No Fermi energy was found in any case");
    }

    output::print_done(&format!(
        "{} of {} cases have a Fermi energy",
        collection.extracted(),
        cases.len()
    ));

    Ok(())
}

/// 确定要处理的算例：显式列表优先，否则自动发现
pub fn resolve_cases(
    layout: &CaseLayout,
    cases: Option<&str>,
    pattern: Option<&str>,
) -> Result<Vec<String>> {
    if let Some(list) = cases {
        return Ok(parse_case_list(list));
    }

    let mut collector = CaseCollector::new(&layout.root);
    if let Some(pattern) = pattern {
        collector = collector.with_pattern(pattern)?;
    }
    collector.collect()
}

/// 带进度条的批量提取，逐算例打印结果
pub fn run_collection(layout: &CaseLayout, cases: &[String]) -> Result<FermiCollection> {
    let pb = progress::create_case_bar(cases.len() as u64, "Extracting");

    let collection = collect_fermi_energies(layout, cases, |case, outcome| {
        pb.suspend(|| output::print_fermi_outcome(case, outcome));
        pb.inc(1);
    });

    pb.finish_and_clear();
    let collection = collection?;

    output::print_success(&format!(
        "Extraction completed. Results saved in '{}'",
        collection.summary_path.display()
    ));

    Ok(collection)
}

fn summary_rows(collection: &FermiCollection) -> Vec<FermiRow> {
    collection
        .records()
        .into_iter()
        .zip(&collection.outcomes)
        .map(|(record, (_, outcome))| {
            let status = match outcome {
                FermiOutcome::Extracted(_) => "extracted",
                FermiOutcome::Absent => "absent",
                FermiOutcome::NotFound(_) => "log not found",
            };
            FermiRow {
                energy: record
                    .energy_ev
                    .map_or_else(|| "-".to_string(), |e| format!("{:.4}", e)),
                case: record.case_id,
                status: status.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_explicit_cases_keeps_order() {
        let dir = TempDir::new().unwrap();
        let layout = CaseLayout::new(dir.path());
        let cases = resolve_cases(&layout, Some("C-STO-20,C-STO-00"), None).unwrap();
        assert_eq!(cases, vec!["C-STO-20", "C-STO-00"]);
    }

    #[test]
    fn test_resolve_discovered_cases() {
        let dir = TempDir::new().unwrap();
        for name in ["C-STO-20", "C-STO-00", "Si"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        let layout = CaseLayout::new(dir.path());
        let cases = resolve_cases(&layout, None, Some("C-STO-*")).unwrap();
        assert_eq!(cases, vec!["C-STO-00", "C-STO-20"]);
    }

    #[test]
    fn test_summary_rows_report_every_case() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(
            dir.path().join("a").join("scf_output.txt"),
            "the Fermi energy is -1.5000 ev\n",
        )
        .unwrap();

        let layout = CaseLayout::new(dir.path());
        let cases = vec!["a".to_string(), "b".to_string()];
        let collection = run_collection(&layout, &cases).unwrap();
        let rows = summary_rows(&collection);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].case, "a");
        assert_eq!(rows[0].energy, "-1.5000");
        assert_eq!(rows[1].case, "b");
        assert_eq!(rows[1].energy, "-");
        assert_eq!(rows[1].status, "log not found");
    }
}
