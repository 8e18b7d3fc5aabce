//! # 图标转换模块（converter）
//!
//! ## 设计思路
//!
//! 该模块将“背景色解析 → 文件发现 → 解码缩放 → 合成量化 → 清单输出”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `config`：批处理参数与默认值
//! - `color`：背景色解析、透明度合成、RGB565 量化
//! - `pipeline`：单文件解码、降采样、居中、编码与写出
//! - `manifest`：清单记录与 JSON 输出
//! - `batch`：发现输入并编排整批流程
//! - `error`：统一错误类型
//!
//! ## 调用链
//!
//! ```text
//! cli::run
//!    ↓
//! parse_hex_color（配置校验，失败即终止）
//!    ↓
//! batch::run_batch
//!    ├─ discover_png_files（按文件名排序）
//!    ├─ pipeline::convert_png_to_rgb565_bin（逐个文件）
//!    └─ Manifest::write_to
//! ```

mod batch;
mod color;
mod config;
mod error;
mod manifest;
mod pipeline;

pub use batch::{discover_png_files, normalize_dir, run_batch, BatchReport};
pub use color::{blend_channel, parse_hex_color, rgb888_to_rgb565, Rgb};
pub use config::{ConvertConfig, DEFAULT_MANIFEST_NAME, DEFAULT_SIZE, PIXEL_FORMAT};
pub use error::ConvertError;
pub use manifest::{IconEntry, Manifest};
pub use pipeline::{
    center_offset, compose_canvas, convert_png_to_rgb565_bin, fit_within, flatten_to_rgb565,
};
