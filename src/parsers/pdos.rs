//! # projwfc.x 总 PDOS 文件解析器
//!
//! 读取 `*.pdos_tot` 文件并以 Fermi 能量为零点平移能量轴。
//!
//! ## 格式说明
//! ```text
//! #  E (eV)  dos(E)    pdos(E)
//!  -10.000  0.123E-01  0.118E-01
//!   -9.990  0.131E-01  0.126E-01
//! ```
//! - 空白分隔的三列数值，无表头
//! - 以 `#` 开头的行为注释
//! - 任一非注释行不能拆成三个有限数值时，整个文件加载失败
//!
//! ## 依赖关系
//! - 被 `commands/pdos.rs`, `commands/compare.rs` 使用
//! - 使用 `models/dos.rs`

use crate::error::{QepdosError, Result};
use crate::models::{DosSample, DosSeries, ShiftedDosSeries};

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 默认的总 PDOS 文件名
pub const DEFAULT_PDOS_FILE: &str = "VLAB.pdos_tot";

/// 加载 `<directory>/<case_id>/<pdos_filename>` 并平移
///
/// 先检查 Fermi 参考值，再检查文件：缺少参考值时不触碰文件系统。
pub fn load_pdos(
    directory: &Path,
    case_id: &str,
    fermi_energy: Option<f64>,
    pdos_filename: &str,
) -> Result<ShiftedDosSeries> {
    let fermi_energy = fermi_energy.ok_or_else(|| QepdosError::MissingReference {
        case: case_id.to_string(),
    })?;

    let path = directory.join(case_id).join(pdos_filename);
    let series = parse_pdos_file(&path)?;
    if series.is_empty() {
        log::warn!("{}: no data rows in {}", case_id, path.display());
    }

    log::debug!(
        "{}: {} samples, shifting by E_F = {} eV",
        case_id,
        series.len(),
        fermi_energy
    );

    Ok(series.shift(fermi_energy))
}

/// 解析 PDOS 文件（未平移）
pub fn parse_pdos_file(path: &Path) -> Result<DosSeries> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => QepdosError::NotFound {
            path: path.display().to_string(),
        },
        _ => QepdosError::FileReadError {
            path: path.display().to_string(),
            source: e,
        },
    })?;

    parse_pdos_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 PDOS 表
///
/// `source` 仅用于错误信息。
pub fn parse_pdos_content(content: &str, source: &str) -> Result<DosSeries> {
    let mut samples = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let sample = parse_row(line).ok_or_else(|| QepdosError::MalformedRow {
            path: source.to_string(),
            line: idx + 1,
            content: line.to_string(),
        })?;
        samples.push(sample);
    }

    Ok(DosSeries::new(samples))
}

/// 解析单行：必须恰好三个有限数值
fn parse_row(line: &str) -> Option<DosSample> {
    let values: Vec<f64> = line
        .split_whitespace()
        .map(|w| w.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<_>>>()?;

    match values.as_slice() {
        [energy, dos, pdos] => Some(DosSample::new(*energy, *dos, *pdos)),
        _ => None,
    }
}
