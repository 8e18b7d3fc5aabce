//! # 配置模块
//!
//! ## 设计思路
//!
//! 将单次批处理的所有可调参数集中到 `ConvertConfig`，命令行层只负责把参数映射进来，
//! 库调用方也可以直接构造配置而不经过 clap。
//!
//! ## 实现思路
//!
//! - `Default` 提供与命令行默认值一致的配置（64px、黑色背景、`manifest.json`）。
//! - 降采样滤镜默认 `Lanczos3`，避免图标边缘出现锯齿。

use image::imageops::FilterType;

use super::Rgb;

/// 输出格式标签，写入每条清单记录。
pub const PIXEL_FORMAT: &str = "RGB565_LE";

/// 默认输出边长（像素）。
pub const DEFAULT_SIZE: u32 = 64;

/// 默认清单文件名。
pub const DEFAULT_MANIFEST_NAME: &str = "manifest.json";

/// 图标转换配置。
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// 输出正方形边长（像素），必须大于 0。
    pub size: u32,
    /// 透明像素合成用的背景色。
    pub background: Rgb,
    /// 写入目标目录的清单文件名。
    pub manifest_name: String,
    /// 降采样滤镜策略。
    pub resize_filter: FilterType,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            background: Rgb::BLACK,
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            resize_filter: FilterType::Lanczos3,
        }
    }
}

impl ConvertConfig {
    /// 单个输出缓冲的字节数：`size * size * 2`。
    pub fn output_len(&self) -> usize {
        self.size as usize * self.size as usize * 2
    }
}
