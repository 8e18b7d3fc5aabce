//! 命令行入口模块
//!
//! # 设计思路
//!
//! 命令行层只做参数适配：把 clap 解析结果映射为 `ConvertConfig`，
//! 调用批处理，再输出两行摘要。
//!
//! # 实现思路
//!
//! - 背景色在任何文件系统操作之前解析，非法时目标目录不会被创建。
//! - 摘要写入调用方传入的 `Write`，便于测试捕获输出。

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use crate::converter::{self, ConvertConfig, DEFAULT_MANIFEST_NAME, DEFAULT_SIZE};
use crate::error::AppError;

/// Convert PNG icons to RGB565 little-endian .bin files plus a JSON manifest.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Source directory with PNG files
    #[arg(long)]
    pub src: PathBuf,

    /// Destination directory for .bin files
    #[arg(long)]
    pub dst: PathBuf,

    /// Output width/height (square)
    #[arg(long, default_value_t = DEFAULT_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: u32,

    /// Background color in RRGGBB, leading '#' optional
    #[arg(long, default_value = "000000")]
    pub bg: String,

    /// Manifest filename
    #[arg(long, default_value = DEFAULT_MANIFEST_NAME)]
    pub manifest: String,
}

impl Args {
    /// 映射为转换配置，背景色非法时直接返回错误。
    pub fn to_config(&self) -> Result<ConvertConfig, AppError> {
        let background = converter::parse_hex_color(&self.bg)?;

        Ok(ConvertConfig {
            size: self.size,
            background,
            manifest_name: self.manifest.clone(),
            ..ConvertConfig::default()
        })
    }
}

/// 执行一次完整转换并输出摘要。
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), AppError> {
    let config = args.to_config()?;
    let report = converter::run_batch(&args.src, &args.dst, &config)?;

    writeln!(
        out,
        "Converted {} icons to {}",
        report.manifest.icon_count,
        report.output_dir.display()
    )?;
    writeln!(out, "Manifest: {}", report.manifest_path.display())?;

    Ok(())
}
