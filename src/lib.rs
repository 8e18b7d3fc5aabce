//! # 图标 RGB565 转换工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs ── env_logger 初始化 + clap 解析 + 退出码         │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Result<(), AppError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  ┌─ cli ──────── Args → ConvertConfig，输出摘要           │
//! │  │                                                       │
//! │  ├─ error ────── AppError (统一错误类型)                   │
//! │  │                                                       │
//! │  └─ converter ── PNG → RGB565_LE + manifest.json         │
//! │      ├─ color      背景色解析 / 合成 / 量化               │
//! │      ├─ pipeline   解码 / 降采样 / 居中 / 编码            │
//! │      ├─ manifest   清单记录与 JSON                        │
//! │      └─ batch      文件发现与整批编排                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`cli`] | 命令行参数定义与一次完整运行 |
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`converter`] | PNG 图标批量转换为定长 RGB565 缓冲与清单 |

pub mod cli;
pub mod converter;
pub mod error;
