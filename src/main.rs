//! # qepdos - Quantum ESPRESSO 态密度对齐与比较工具
//!
//! 从 pw.x 日志中提取 Fermi 能量，以其为零点对齐两个算例的投影态密度并绘图。
//!
//! ## 子命令
//! - `fermi`   - 批量提取 Fermi 能量，写入 `fermi_energies.txt`
//! - `pdos`    - 加载并平移单个算例的总 PDOS
//! - `compare` - 两个算例的 PDOS 比较图，可选导出 PDF
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (批量提取与算例布局)
//!   │     ├── parsers/   (日志与 PDOS 解析器)
//!   │     ├── plot/      (比较图渲染与 PDF 导出)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod plot;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

/// 初始化日志；RUST_LOG 优先于 --verbose
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
