//! # wav2mp3-codec
//!
//! 编码层, 负责驱动外部 MP3 编码引擎.
//!
//! - `encoder`: 编码器 trait, 对外部引擎的最小抽象
//! - `encoder_params`: 由容器头推导出的编码参数
//! - `session`: 编码会话, 以作用域方式管理引擎句柄的生命周期
//! - `driver`: 按 1152 采样组分帧送入编码器并流式写出
//! - `lame`: 基于 LAME 的编码器实现

pub mod driver;
pub mod encoder;
pub mod encoder_params;
pub mod lame;
pub mod session;

// 重导出常用类型
pub use driver::{EncodeStats, FrameDriver};
pub use encoder::{EncoderFactory, FrameEncoder};
pub use encoder_params::{DEFAULT_QUALITY, EncoderParams, FRAME_SAMPLES};
pub use lame::LameFactory;
pub use session::{EncoderSession, SessionState};

#[cfg(test)]
pub(crate) mod mock;
