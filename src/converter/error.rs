//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载转换链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 分类与批处理阶段一一对应：
//! - 配置阶段：`InvalidColor`
//! - 发现阶段：`SourceMissing` / `NoInputs`
//! - 单文件阶段：`Decode` / `Resize` / `FileSystem`
//! - 收尾阶段：`Manifest`

/// 图标转换统一错误类型。
///
/// 该类型会在应用层被上转为 `AppError`，最终由 `main` 打印并以非零状态退出。
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// 背景色字符串不合法（长度或十六进制字符）。
    #[error("{0}")]
    InvalidColor(String),

    /// 源目录不存在或不是目录。
    #[error("source directory not found: {0}")]
    SourceMissing(String),

    /// 源目录中没有任何 PNG 文件。
    #[error("No PNG files found in {0}")]
    NoInputs(String),

    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("failed to resize {path}: {reason}")]
    Resize { path: String, reason: String },

    #[error("file error on {path}: {source}")]
    FileSystem {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write manifest {path}: {reason}")]
    Manifest { path: String, reason: String },
}

impl ConvertError {
    /// 为 I/O 错误附带路径信息。
    pub(crate) fn file_system(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.display().to_string(),
            source,
        }
    }
}
