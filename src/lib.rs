//! # wav2mp3
//!
//! 批量把目录中的 16 位 PCM WAV 文件转换为 MP3.
//!
//! 每个文件独立经过同一条管线:
//! 解析 44 字节 WAV 头 → 读取 PCM 数据 → 按 1152 采样组分帧送入 LAME → 刷新.
//! 单个文件失败只影响它自己, 批处理继续.
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `wav2mp3-core` | 错误类型与声道模式 |
//! | `wav2mp3-codec` | 编码器抽象、编码会话、分帧驱动、LAME 后端 |
//! | `wav2mp3-format` | WAV 头解析与 PCM 读取 |
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wav2mp3::{ConvertConfig, TracingReporter, batch};
//! use wav2mp3::codec::LameFactory;
//!
//! # async fn run() -> wav2mp3::core::ConvertResult<()> {
//! let summary = batch::convert_dir(
//!     std::path::Path::new("music"),
//!     Arc::new(ConvertConfig::default()),
//!     Arc::new(LameFactory),
//!     Arc::new(TracingReporter),
//! )
//! .await?;
//! println!("成功 {} 个, 失败 {} 个", summary.succeeded.len(), summary.failed.len());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod report;

/// 核心类型 (错误与声道模式)
pub use wav2mp3_core as core;

/// 编码层
pub use wav2mp3_codec as codec;

/// 容器层
pub use wav2mp3_format as format;

pub use batch::{BatchSummary, convert_dir, list_candidates};
pub use config::ConvertConfig;
pub use pipeline::{FileReport, convert_file};
pub use report::{Reporter, TracingReporter};

/// 获取版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
