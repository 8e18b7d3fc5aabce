//! # 解码与变换流水线模块
//!
//! ## 设计思路
//!
//! 将“PNG 文件 → RGBA → 居中画布 → RGB565 字节”的过程集中管理，
//! 输出由固件直接读取，每一步的取整方式都是固定的。
//!
//! ## 实现思路
//!
//! 1. 解码并统一为 RGBA8（无 alpha 的源图默认不透明）
//! 2. 只缩小不放大：按缩略图规则计算目标尺寸，Lanczos3 降采样
//! 3. 贴到 `size x size` 的全透明画布中央（偏移向下取整）
//! 4. 逐像素与背景色合成，量化为 RGB565，小端写出
//!
//! 源图在贴入画布后立即释放，画布处理阶段只持有画布本身。

use fast_image_resize as fr;
use image::imageops::{self, FilterType};
use image::{ImageReader, RgbaImage};
use std::fs;
use std::path::Path;

use super::config::PIXEL_FORMAT;
use super::{ConvertConfig, ConvertError, IconEntry, Rgb};

/// 转换单个 PNG 为 RGB565 小端二进制文件，返回清单记录。
///
/// 任意一步失败都会直接返回错误，由批处理层终止整批任务。
pub fn convert_png_to_rgb565_bin(
    source: &Path,
    target: &Path,
    config: &ConvertConfig,
) -> Result<IconEntry, ConvertError> {
    let size = config.size;

    let canvas = {
        let decoded = decode_rgba(source)?;
        let (src_width, src_height) = decoded.dimensions();

        let fitted = match fit_within(src_width, src_height, size) {
            Some((width, height)) => {
                log::debug!(
                    "缩放 {}：{}x{} -> {}x{}（filter={:?}）",
                    source.display(),
                    src_width,
                    src_height,
                    width,
                    height,
                    config.resize_filter
                );
                resize_rgba(source, decoded, width, height, config.resize_filter)
            }
            None => decoded,
        };

        compose_canvas(&fitted, size)
    };

    let bytes = flatten_to_rgb565(&canvas, config.background);
    debug_assert_eq!(bytes.len(), config.output_len());

    fs::write(target, &bytes).map_err(|e| ConvertError::file_system(target, e))?;

    log::info!(
        "✅ 已转换 {} -> {}（{} 字节）",
        source.display(),
        target.display(),
        bytes.len()
    );

    Ok(IconEntry {
        name: file_stem_lossy(source),
        png: file_name_lossy(source),
        bin: file_name_lossy(target),
        width: size,
        height: size,
        bytes: bytes.len(),
        format: PIXEL_FORMAT.to_string(),
    })
}

/// 解码图片并统一为 RGBA8。
///
/// 格式按文件内容探测，不依赖扩展名。
fn decode_rgba(path: &Path) -> Result<RgbaImage, ConvertError> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| ConvertError::file_system(path, e))?;

    let decoded = reader.decode().map_err(|e| ConvertError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(decoded.to_rgba8())
}

/// 计算缩略图尺寸：宽高都不超过 `size`，保持宽高比，只缩不放。
///
/// 已在范围内时返回 `None`。受限的一边取 `size`，另一边在 floor/ceil 之间
/// 取更接近原宽高比的值（相同时取 floor），且不小于 1。
pub fn fit_within(width: u32, height: u32, size: u32) -> Option<(u32, u32)> {
    if width <= size && height <= size {
        return None;
    }

    let aspect = width as f64 / height as f64;
    let target = size as f64;

    if 1.0 >= aspect {
        let x = round_aspect(target * aspect, |n| (aspect - n as f64 / target).abs());
        Some((x, size))
    } else {
        let y = round_aspect(target / aspect, |n| {
            if n == 0 {
                0.0
            } else {
                (aspect - target / n as f64).abs()
            }
        });
        Some((size, y))
    }
}

fn round_aspect(value: f64, key: impl Fn(u32) -> f64) -> u32 {
    let floor = value.floor() as u32;
    let ceil = value.ceil() as u32;
    let picked = if key(ceil) < key(floor) { ceil } else { floor };
    picked.max(1)
}

/// 居中偏移：`(size - dim) / 2`，奇数差值时右/下多留 1 像素。
#[inline]
pub fn center_offset(size: u32, dim: u32) -> u32 {
    size.saturating_sub(dim) / 2
}

/// 将图像原样贴到全透明画布中央（覆盖而非合成）。
pub fn compose_canvas(image: &RgbaImage, size: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(size, size);
    let offset_x = center_offset(size, image.width());
    let offset_y = center_offset(size, image.height());

    imageops::replace(&mut canvas, image, offset_x as i64, offset_y as i64);
    canvas
}

/// 与背景合成并编码为 RGB565 小端字节流，行优先（y 外层、x 内层）。
pub fn flatten_to_rgb565(canvas: &RgbaImage, background: Rgb) -> Vec<u8> {
    let (width, height) = canvas.dimensions();
    let mut output = Vec::with_capacity(width as usize * height as usize * 2);

    for y in 0..height {
        for x in 0..width {
            let [r, g, b, a] = canvas.get_pixel(x, y).0;
            let color = background.composite(Rgb::new(r, g, b), a).to_rgb565();
            output.extend_from_slice(&color.to_le_bytes());
        }
    }

    output
}

/// 降采样，优先 `fast_image_resize`，失败时回退 `image::imageops::resize`。
fn resize_rgba(
    source: &Path,
    image: RgbaImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> RgbaImage {
    match resize_with_fast_image_resize(source, &image, width, height, filter) {
        Ok(resized) => resized,
        Err(err) => {
            log::warn!("⚠️ 降采样失败，回退 image::imageops::resize：{}", err);
            imageops::resize(&image, width, height, filter)
        }
    }
}

fn resize_with_fast_image_resize(
    source: &Path,
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbaImage, ConvertError> {
    let resize_error = |reason: String| ConvertError::Resize {
        path: source.display().to_string(),
        reason,
    };
    let (src_width, src_height) = image.dimensions();

    // 复制一份像素：原图需保留给失败时的 image::imageops 回退路径
    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().to_vec(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| resize_error(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    // U8x4 按 RGBA 处理，默认启用 alpha 预乘，透明边缘不会渗入黑色
    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| resize_error(format!("fast_image_resize 执行失败：{}", e)))?;

    RgbaImage::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| resize_error("fast_image_resize 输出缓冲长度异常".to_string()))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

fn file_stem_lossy(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "icon-rgb565-pipeline-{tag}-{}-{nanos}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("create scratch dir failed");
        dir
    }

    fn pixel_at(bytes: &[u8], size: u32, x: u32, y: u32) -> u16 {
        let i = ((y * size + x) * 2) as usize;
        u16::from_le_bytes([bytes[i], bytes[i + 1]])
    }

    #[test]
    fn fit_within_keeps_images_already_in_bounds() {
        assert_eq!(fit_within(32, 32, 64), None);
        assert_eq!(fit_within(64, 64, 64), None);
        assert_eq!(fit_within(64, 10, 64), None);
    }

    #[test]
    fn fit_within_scales_limiting_side_to_size() {
        assert_eq!(fit_within(128, 128, 64), Some((64, 64)));
        assert_eq!(fit_within(128, 64, 64), Some((64, 32)));
        assert_eq!(fit_within(64, 128, 64), Some((32, 64)));
    }

    #[test]
    fn fit_within_rounds_to_closest_aspect() {
        // 64 / 3.125 = 20.48，floor 更接近原宽高比
        assert_eq!(fit_within(100, 32, 64), Some((64, 20)));
        // 64 / 6.5 = 9.85，ceil 更接近原宽高比
        assert_eq!(fit_within(65, 10, 64), Some((64, 10)));
    }

    #[test]
    fn fit_within_never_returns_zero_dimension() {
        assert_eq!(fit_within(1000, 1, 16), Some((16, 1)));
        assert_eq!(fit_within(1, 1000, 16), Some((1, 16)));
    }

    #[test]
    fn center_offset_floors_odd_margins() {
        assert_eq!(center_offset(64, 32), 16);
        assert_eq!(center_offset(64, 63), 0);
        assert_eq!(center_offset(64, 61), 1);
        assert_eq!(center_offset(64, 64), 0);
    }

    #[test]
    fn compose_canvas_centers_on_each_axis_independently() {
        let image = RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]));
        let canvas = compose_canvas(&image, 9);

        // 横向偏移 (9-4)/2 = 2，纵向偏移 (9-2)/2 = 3
        assert_eq!(canvas.get_pixel(2, 3).0, [10, 20, 30, 255]);
        assert_eq!(canvas.get_pixel(5, 4).0, [10, 20, 30, 255]);
        assert_eq!(canvas.get_pixel(1, 3).0, [0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(6, 3).0, [0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(2, 2).0, [0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(2, 5).0, [0, 0, 0, 0]);
    }

    #[test]
    fn compose_canvas_replaces_instead_of_compositing() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 7]));
        let canvas = compose_canvas(&image, 1);
        assert_eq!(canvas.get_pixel(0, 0).0, [200, 100, 50, 7]);
    }

    #[test]
    fn flatten_writes_little_endian_row_major() {
        let mut canvas = RgbaImage::new(2, 2);
        canvas.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        canvas.put_pixel(0, 1, Rgba([0, 0, 255, 255]));

        let bytes = flatten_to_rgb565(&canvas, Rgb::new(0, 255, 0));

        assert_eq!(
            bytes,
            vec![
                0xE0, 0x07, // (0,0) 透明 -> 背景绿
                0x00, 0xF8, // (1,0) 红
                0x1F, 0x00, // (0,1) 蓝
                0xE0, 0x07, // (1,1) 背景绿
            ]
        );
    }

    #[test]
    fn fast_resize_returns_typed_image_of_target_size() {
        let image = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 255, 255]));

        let resized = resize_with_fast_image_resize(
            Path::new("wide.png"),
            &image,
            20,
            10,
            FilterType::Lanczos3,
        )
        .expect("resize failed");

        assert_eq!(resized.dimensions(), (20, 10));
        assert_eq!(resized.get_pixel(10, 5).0[2], 255);
        assert_eq!(resized.get_pixel(10, 5).0[3], 255);
    }

    #[test]
    fn resize_error_names_the_source_file() {
        let err = ConvertError::Resize {
            path: "icons/wide.png".to_string(),
            reason: "fast_image_resize 执行失败：boom".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "failed to resize icons/wide.png: fast_image_resize 执行失败：boom"
        );
    }

    #[test]
    fn resize_rgba_keeps_transparent_margin_transparent() {
        let mut image = RgbaImage::new(64, 64);
        for y in 16..48 {
            for x in 16..48 {
                image.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }

        let resized = resize_rgba(Path::new("box.png"), image, 32, 32, FilterType::Lanczos3);

        assert_eq!(resized.dimensions(), (32, 32));
        assert_eq!(resized.get_pixel(0, 0).0[3], 0);
        assert_eq!(resized.get_pixel(16, 16).0[3], 255);
    }

    #[test]
    fn convert_small_image_pads_with_background() {
        let dir = scratch_dir("small");
        let source = dir.join("dot.png");
        let target = dir.join("dot.bin");
        RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]))
            .save(&source)
            .expect("write source png failed");

        let config = ConvertConfig {
            size: 8,
            background: Rgb::new(255, 255, 255),
            ..ConvertConfig::default()
        };
        let entry = convert_png_to_rgb565_bin(&source, &target, &config).expect("convert failed");

        assert_eq!(entry.name, "dot");
        assert_eq!(entry.png, "dot.png");
        assert_eq!(entry.bin, "dot.bin");
        assert_eq!((entry.width, entry.height, entry.bytes), (8, 8, 128));
        assert_eq!(entry.format, "RGB565_LE");

        let bytes = fs::read(&target).expect("read output failed");
        assert_eq!(bytes.len(), 128);
        assert_eq!(pixel_at(&bytes, 8, 0, 0), 0xFFFF);
        assert_eq!(pixel_at(&bytes, 8, 3, 3), 0xF800);
        assert_eq!(pixel_at(&bytes, 8, 4, 4), 0xF800);
        assert_eq!(pixel_at(&bytes, 8, 5, 5), 0xFFFF);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn convert_wide_image_downscales_and_letterboxes() {
        let dir = scratch_dir("wide");
        let source = dir.join("bar.png");
        let target = dir.join("bar.bin");
        RgbaImage::from_pixel(128, 32, Rgba([255, 0, 0, 255]))
            .save(&source)
            .expect("write source png failed");

        let config = ConvertConfig {
            size: 64,
            ..ConvertConfig::default()
        };
        let entry = convert_png_to_rgb565_bin(&source, &target, &config).expect("convert failed");
        let bytes = fs::read(&target).expect("read output failed");

        assert_eq!(entry.bytes, 64 * 64 * 2);
        assert_eq!(bytes.len(), 64 * 64 * 2);
        // 缩放为 64x16，纵向偏移 24
        assert_eq!(pixel_at(&bytes, 64, 32, 0), 0x0000);
        assert_eq!(pixel_at(&bytes, 64, 32, 23), 0x0000);
        assert_eq!(pixel_at(&bytes, 64, 32, 32), 0xF800);
        assert_eq!(pixel_at(&bytes, 64, 32, 40), 0x0000);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn convert_rejects_non_image_file() {
        let dir = scratch_dir("garbage");
        let source = dir.join("broken.png");
        fs::write(&source, b"definitely not a png").expect("write garbage failed");

        let result = convert_png_to_rgb565_bin(&source, &dir.join("broken.bin"), &ConvertConfig::default());

        assert!(matches!(result, Err(ConvertError::Decode { .. })));
        assert!(!dir.join("broken.bin").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
