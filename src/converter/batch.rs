//! # 批处理编排模块
//!
//! ## 设计思路
//!
//! `run_batch` 只负责流程编排，单文件转换细节交给 `pipeline`。
//! 处理链路固定为：
//! 1. 校验源目录
//! 2. 发现并排序 PNG（文件名字典序即处理顺序与清单顺序）
//! 3. 创建目标目录
//! 4. 逐个转换，收集清单记录
//! 5. 写出清单
//!
//! ## 实现思路
//!
//! - 在任何写入之前完成全部前置校验：空目录不会留下目标目录或清单。
//! - 不做部分失败隔离：任一文件失败即终止，已写出的 `.bin` 保留在磁盘上。

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use super::pipeline::convert_png_to_rgb565_bin;
use super::{ConvertConfig, ConvertError, Manifest};

const PNG_EXTENSION: &str = "png";
const PNG_DOT_NAME: &str = ".png";

/// 一次批处理的结果。
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub manifest: Manifest,
    /// 规整后的输出目录。
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
}

/// 规整目录路径：去掉重复与末尾的 `/` 以及 `.` 段，空路径视为 `.`。
///
/// 不访问文件系统，也不解析 `..`。
pub fn normalize_dir(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// `*.png` 匹配：扩展名恰为 `png`，或文件名本身就是 `.png`。
fn is_png_name(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PNG_EXTENSION)
        || path.file_name().is_some_and(|name| name == PNG_DOT_NAME)
}

/// 列出目录下扩展名为 `png` 的普通文件，按文件名排序。
///
/// 不递归子目录；扩展名区分大小写，隐藏文件同样匹配。
pub fn discover_png_files(source_dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !source_dir.is_dir() {
        return Err(ConvertError::SourceMissing(source_dir.display().to_string()));
    }

    let entries = fs::read_dir(source_dir).map_err(|e| ConvertError::file_system(source_dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConvertError::file_system(source_dir, e))?.path();
        if is_png_name(&path) && path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// 执行整批转换并写出清单。
///
/// # 示例
/// ```rust,ignore
/// use icon_rgb565::converter::{run_batch, ConvertConfig};
/// use std::path::Path;
///
/// let report = run_batch(Path::new("icons"), Path::new("out"), &ConvertConfig::default())?;
/// assert_eq!(report.manifest.icon_count, report.manifest.entries.len());
/// # Ok::<(), icon_rgb565::converter::ConvertError>(())
/// ```
pub fn run_batch(
    source_dir: &Path,
    output_dir: &Path,
    config: &ConvertConfig,
) -> Result<BatchReport, ConvertError> {
    let started = Instant::now();
    let source_dir = normalize_dir(source_dir);
    let output_dir = normalize_dir(output_dir);
    let (source_dir, output_dir) = (source_dir.as_path(), output_dir.as_path());

    let png_files = discover_png_files(source_dir)?;
    if png_files.is_empty() {
        return Err(ConvertError::NoInputs(source_dir.display().to_string()));
    }

    log::info!(
        "📂 发现 {} 个 PNG：{}（size={}, bg={}）",
        png_files.len(),
        source_dir.display(),
        config.size,
        config.background.to_hex()
    );

    fs::create_dir_all(output_dir).map_err(|e| ConvertError::file_system(output_dir, e))?;

    let mut entries = Vec::with_capacity(png_files.len());
    for png_file in &png_files {
        let stem = png_file.file_stem().unwrap_or_default();
        let mut target_name = stem.to_os_string();
        target_name.push(".bin");
        let target = output_dir.join(target_name);

        entries.push(convert_png_to_rgb565_bin(png_file, &target, config)?);
    }

    let manifest = Manifest::new(
        source_dir,
        output_dir,
        config.size,
        config.background.to_hex(),
        entries,
    );

    let manifest_path = output_dir.join(&config.manifest_name);
    manifest.write_to(&manifest_path)?;

    log::info!(
        "⏱️ 批处理完成：{} 个图标，耗时 {}ms",
        manifest.icon_count,
        started.elapsed().as_millis()
    );

    Ok(BatchReport {
        manifest,
        output_dir: output_dir.to_path_buf(),
        manifest_path,
    })
}
