//! # 图标 RGB565 转换工具 — 应用入口
//!
//! 本文件仅负责日志初始化、参数解析与退出码。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use clap::Parser;
use icon_rgb565::cli::{self, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    // 默认只输出警告，成功时终端只看到两行摘要；RUST_LOG=info 可查看逐文件进度
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let stdout = std::io::stdout();

    match cli::run(&args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("运行失败: {err:?}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
