//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。
//!
//! ## 依赖关系
//! - 被 `commands/fermi.rs`, `commands/compare.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

const CASE_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// 创建逐算例进度条
pub fn create_case_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    // 模板为常量，解析失败时退回默认样式
    if let Ok(style) = ProgressStyle::with_template(CASE_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}
