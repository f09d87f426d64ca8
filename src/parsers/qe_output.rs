//! # Quantum ESPRESSO pw.x 输出解析器
//!
//! 从 SCF/NSCF 日志中提取 Fermi 能量。
//!
//! 同一日志可能包含多次运行的输出，后面的运行覆盖前面的结果，
//! 因此从文件末尾向前扫描，第一个匹配即为最终值。
//!
//! ## 匹配格式
//! ```text
//!      the Fermi energy is    -3.1416 ev
//! ```
//!
//! ## 依赖关系
//! - 被 `batch/fermi.rs` 使用
//! - 使用 `regex` 匹配 Fermi 能量行

use crate::error::{QepdosError, Result};

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Fermi 能量行正则（大小写不敏感，数值必须带小数部分）
fn fermi_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)the Fermi energy is\s+(-?\d+\.\d+)\s+ev").expect("valid Fermi regex")
    })
}

/// 从日志文件提取最后一次出现的 Fermi 能量
///
/// - 文件不存在或不可读: `Err(NotFound)`
/// - 文件可读但无匹配行: `Ok(None)`
pub fn extract_fermi_energy(path: &Path) -> Result<Option<f64>> {
    let bytes = fs::read(path).map_err(|e| {
        log::debug!("cannot read {}: {}", path.display(), e);
        QepdosError::NotFound {
            path: path.display().to_string(),
        }
    })?;

    // 日志中偶有非 UTF-8 字节，不应因此视为缺失
    let content = String::from_utf8_lossy(&bytes);
    let energy = extract_fermi_from_content(&content);

    match energy {
        Some(e) => log::debug!("{}: Fermi energy {} eV", path.display(), e),
        None => log::debug!("{}: no Fermi energy line", path.display()),
    }

    Ok(energy)
}

/// 从日志内容中提取最后一次出现的 Fermi 能量
pub fn extract_fermi_from_content(content: &str) -> Option<f64> {
    let re = fermi_regex();
    content
        .lines()
        .rev()
        .find_map(|line| re.captures(line))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_last_statement_wins() {
        let content = r#"
     Program PWSCF v.7.2 starts on 16Oct2026

     the Fermi energy is     1.2345 ev

     convergence has been achieved in  12 iterations

     Program PWSCF v.7.2 starts on 16Oct2026

     the Fermi energy is    -3.1416 ev

     JOB DONE.
"#;
        assert_eq!(extract_fermi_from_content(content), Some(-3.1416));
    }

    #[test]
    fn test_case_insensitive() {
        let content = "     THE FERMI ENERGY IS 7.5000 EV\n";
        assert_eq!(extract_fermi_from_content(content), Some(7.5));
    }

    #[test]
    fn test_requires_fractional_part() {
        assert_eq!(extract_fermi_from_content("the Fermi energy is 7 ev\n"), None);
        assert_eq!(
            extract_fermi_from_content("the Fermi energy is 7,25 ev\n"),
            None
        );
    }

    #[test]
    fn test_skips_non_matching_tail() {
        // 末尾的非数值行不影响结果
        let content = "the Fermi energy is 2.0000 ev\nthe Fermi energy is unknown ev\n";
        assert_eq!(extract_fermi_from_content(content), Some(2.0));
    }

    #[test]
    fn test_absent_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nscf_output.txt");
        fs::write(&path, "     highest occupied level (ev):     5.1234\n").unwrap();

        let result = extract_fermi_energy(&path).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scf_output.txt");

        let result = extract_fermi_energy(&path);
        assert!(matches!(result, Err(QepdosError::NotFound { .. })));
    }

    #[test]
    fn test_tolerates_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scf_output.txt");
        let mut bytes = b"garbage \xff\xfe line\n".to_vec();
        bytes.extend_from_slice(b"     the Fermi energy is    11.0625 ev\n");
        fs::write(&path, bytes).unwrap();

        assert_eq!(extract_fermi_energy(&path).unwrap(), Some(11.0625));
    }
}
