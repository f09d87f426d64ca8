//! # 美化输出工具
//!
//! 提供统一的终端输出样式，并把流水线的结构化结果渲染为提示信息。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate

use crate::models::FermiOutcome;

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印单个算例的 Fermi 能量提取结果
pub fn print_fermi_outcome(case_id: &str, outcome: &FermiOutcome) {
    match outcome {
        FermiOutcome::Extracted(energy) => {
            print_success(&format!("{}: Fermi Energy = {:?} eV", case_id, energy))
        }
        FermiOutcome::Absent => {
            print_warning(&format!("{}: Fermi Energy not found.", case_id))
        }
        FermiOutcome::NotFound(path) => print_error(&format!(
            "{}: File not found - {}",
            case_id,
            path.display()
        )),
    }
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
