//! # pdos 命令实现
//!
//! 加载单个算例的总 PDOS，以 Fermi 能量为零点平移后汇总，可选导出 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/pdos.rs` 定义的参数
//! - 使用 `parsers/pdos.rs`, `models/fermi.rs`
//! - 使用 `csv` + `serde` 写出平移后的序列

use crate::batch::CaseLayout;
use crate::cli::pdos::PdosArgs;
use crate::error::{QepdosError, Result};
use crate::models::{FermiTable, ShiftedDosSeries};
use crate::parsers::load_pdos;
use crate::utils::output;

use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};

/// CSV 输出行
#[derive(Debug, Serialize)]
struct ShiftedRow {
    #[serde(rename = "energy_minus_ef_ev")]
    energy: f64,
    dos: f64,
    pdos: f64,
}

/// 汇总表行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// 执行 pdos 命令
pub fn execute(args: PdosArgs) -> Result<()> {
    output::print_header("Loading Projected DOS");

    let layout = args.layout.layout();
    let fermi = match args.fermi {
        Some(e) => Some(e),
        None => lookup_fermi(&layout, &args.case)?,
    };

    let series = load_pdos(&layout.root, &args.case, fermi, &layout.pdos_file)?;
    output::print_success(&format!(
        "Loaded '{}' ({} samples)",
        layout.pdos_path(&args.case).display(),
        series.len()
    ));

    println!("{}", Table::new(summary_rows(&args.case, &series)));

    if let Some(ref path) = args.output {
        write_csv(&series, path)?;
        output::print_success(&format!("Shifted PDOS saved to '{}'", path.display()));
    }

    Ok(())
}

/// 从汇总文件查找算例的 Fermi 能量；汇总文件不存在时视为缺失
fn lookup_fermi(layout: &CaseLayout, case_id: &str) -> Result<Option<f64>> {
    let summary = layout.summary_path();
    match FermiTable::read_summary(&summary) {
        Ok(table) => {
            let energy = table.get(case_id);
            if let Some(e) = energy {
                output::print_info(&format!(
                    "Using E_F = {:?} eV from '{}'",
                    e,
                    summary.display()
                ));
            }
            Ok(energy)
        }
        Err(QepdosError::NotFound { path }) => {
            output::print_warning(&format!(
                "No Fermi summary at '{}'; run 'qepdos fermi' or pass --fermi",
                path
            ));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn summary_rows(case_id: &str, series: &ShiftedDosSeries) -> Vec<SummaryRow> {
    let mut rows = vec![
        SummaryRow {
            property: "Case".to_string(),
            value: case_id.to_string(),
        },
        SummaryRow {
            property: "E_F (eV)".to_string(),
            value: format!("{:.4}", series.fermi_energy()),
        },
        SummaryRow {
            property: "Samples".to_string(),
            value: series.len().to_string(),
        },
    ];

    if let Some((min, max)) = series.energy_span() {
        rows.push(SummaryRow {
            property: "E - E_F range (eV)".to_string(),
            value: format!("{:.3} .. {:.3}", min, max),
        });
    }

    if let Some(sample) = series.nearest_to_fermi() {
        rows.push(SummaryRow {
            property: "PDOS near E_F".to_string(),
            value: format!("{:.4} (at {:+.3} eV)", sample.pdos, sample.energy_ev),
        });
    }

    rows
}

/// 将平移后的序列写入 CSV
pub fn write_csv(series: &ShiftedDosSeries, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for s in series.samples() {
        wtr.serialize(ShiftedRow {
            energy: s.energy_ev,
            dos: s.dos,
            pdos: s.pdos,
        })?;
    }

    wtr.flush().map_err(|e| QepdosError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
