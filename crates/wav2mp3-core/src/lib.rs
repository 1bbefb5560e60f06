//! # wav2mp3-core
//!
//! wav2mp3 核心库, 提供各 crate 共用的错误类型与声道模式定义.

pub mod channel_mode;
pub mod error;

// 重导出常用类型
pub use channel_mode::ChannelMode;
pub use error::{ConvertError, ConvertResult, ErrorKind};
