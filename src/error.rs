//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError`，`main` 只需匹配一种错误类型即可决定退出码与错误输出。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ConvertError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。

use crate::converter::ConvertError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 转换流水线错误（配置 / 发现 / 解码 / 写出）
    #[error("{0}")]
    Convert(#[from] ConvertError),

    /// 输出摘要时的 I/O 错误
    #[error("failed to write summary: {0}")]
    Io(#[from] std::io::Error),
}
