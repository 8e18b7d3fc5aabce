//! # 清单模块
//!
//! 每个输入文件产出一条 `IconEntry`，批处理结束时汇总为 `Manifest` 并写成 JSON。
//! 字段顺序即 JSON 输出顺序，下游固件按字段名读取。

use serde::Serialize;
use std::fs;
use std::path::Path;

use super::ConvertError;

/// 单个图标的转换记录，创建后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconEntry {
    /// 逻辑名（源文件名去掉扩展名）。
    pub name: String,
    /// 源文件名。
    pub png: String,
    /// 输出文件名。
    pub bin: String,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
    /// 像素格式标签，固定为 `RGB565_LE`。
    pub format: String,
}

/// 整批转换的清单。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub source: String,
    pub output: String,
    pub icon_count: usize,
    pub size: u32,
    pub background_rgb: String,
    pub entries: Vec<IconEntry>,
}

impl Manifest {
    /// 汇总条目，`icon_count` 始终等于 `entries.len()`。
    pub fn new(
        source: &Path,
        output: &Path,
        size: u32,
        background_rgb: String,
        entries: Vec<IconEntry>,
    ) -> Self {
        Self {
            source: source.to_string_lossy().into_owned(),
            output: output.to_string_lossy().into_owned(),
            icon_count: entries.len(),
            size,
            background_rgb,
            entries,
        }
    }

    /// 两空格缩进的纯 ASCII JSON，末尾带换行。
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut content = escape_non_ascii(&serde_json::to_string_pretty(self)?);
        content.push('\n');
        Ok(content)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ConvertError> {
        let content = self.to_json().map_err(|e| ConvertError::Manifest {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        fs::write(path, content).map_err(|e| ConvertError::Manifest {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// 非 ASCII 字符改写为 `\uXXXX`（小写十六进制，BMP 之外用代理对）。
///
/// JSON 中非 ASCII 字符只会出现在字符串内部，逐字符替换不改变语义。
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    let mut units = [0u16; 2];

    for c in json.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }

    escaped
}
