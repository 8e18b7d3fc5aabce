//! # 颜色模块
//!
//! ## 设计思路
//!
//! 集中处理“用户输入的背景色”与“逐像素颜色运算”：
//! - 解析 `RRGGBB`（可带 `#`）为 `Rgb`，这是唯一拒绝非法颜色串的位置
//! - 透明度合成：整数截断除法
//! - RGB888 → RGB565 量化：高 5/6/5 位拼接
//!
//! 所有运算都是纯函数，便于用属性测试覆盖。

use super::ConvertError;

/// 8 位 RGB 三元组。
///
/// 通道类型为 `u8`，取值范围 `[0, 255]` 由类型保证。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 输出清单使用的 `#RRGGBB`（大写）形式。
    ///
    /// # 示例
    /// ```rust
    /// use icon_rgb565::converter::Rgb;
    ///
    /// assert_eq!(Rgb::new(0xAB, 0x01, 0xFF).to_hex(), "#AB01FF");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// 按 alpha 将前景色合成到 `self`（背景）上。
    pub fn composite(self, fg: Rgb, alpha: u8) -> Rgb {
        Rgb {
            r: blend_channel(fg.r, self.r, alpha),
            g: blend_channel(fg.g, self.g, alpha),
            b: blend_channel(fg.b, self.b, alpha),
        }
    }

    pub fn to_rgb565(self) -> u16 {
        rgb888_to_rgb565(self.r, self.g, self.b)
    }
}

/// 解析 `RRGGBB` / `#RRGGBB` 背景色。
///
/// 先去掉首尾空白与前导 `#`，长度必须恰好为 6，且全部为十六进制字符。
///
/// # 示例
/// ```rust
/// use icon_rgb565::converter::{parse_hex_color, Rgb};
///
/// assert_eq!(parse_hex_color("#FF8000")?, Rgb::new(255, 128, 0));
/// assert!(parse_hex_color("FFF").is_err());
/// # Ok::<(), icon_rgb565::converter::ConvertError>(())
/// ```
pub fn parse_hex_color(value: &str) -> Result<Rgb, ConvertError> {
    let raw = value.trim().trim_start_matches('#');

    if raw.chars().count() != 6 {
        return Err(ConvertError::InvalidColor(
            "bg color must be RRGGBB".to_string(),
        ));
    }

    // 长度已确认为 6 个字符，全部为 ASCII 时下面的切片才安全
    if !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConvertError::InvalidColor(format!(
            "bg color contains non-hex digits: '{}'",
            raw
        )));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&raw[i..i + 2], 16)
            .map_err(|e| ConvertError::InvalidColor(format!("bg color parse error: {}", e)))
    };

    Ok(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// 单通道透明度合成：`(fg * a + bg * (255 - a)) / 255`，整数截断。
///
/// 分子最大为 `255 * 255`，结果不会超过 255。
#[inline]
pub fn blend_channel(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((fg as u32 * a + bg as u32 * (255 - a)) / 255) as u8
}

/// RGB888 → RGB565：红取高 5 位、绿取高 6 位、蓝取高 5 位。
#[inline]
pub fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}
