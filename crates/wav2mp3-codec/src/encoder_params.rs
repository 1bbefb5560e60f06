//! 编码参数.
//!
//! 从 WAV 头提取, 每个文件配置一次, 之后不再变化.

use wav2mp3_core::ChannelMode;

/// 每次送入编码器的采样组数 (MP3 一帧的粒度)
pub const FRAME_SAMPLES: usize = 1152;

/// 固定的编码质量 (0 最好, 9 最差)
pub const DEFAULT_QUALITY: u8 = 6;

/// 编码器配置参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderParams {
    /// 声道数
    pub channels: u16,
    /// 输入采样率 (Hz)
    pub in_sample_rate: u32,
    /// 输出采样率 (Hz), 与输入一致, 不做重采样
    pub out_sample_rate: u32,
    /// 声道模式
    pub mode: ChannelMode,
    /// 编码质量
    pub quality: u8,
}

impl EncoderParams {
    /// 按声道数与采样率构造参数, 质量使用固定默认值
    pub fn new(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            in_sample_rate: sample_rate,
            out_sample_rate: sample_rate,
            mode: ChannelMode::from_channels(channels),
            quality: DEFAULT_QUALITY,
        }
    }

    /// 指定编码质量
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// 一帧输出的保守上界: 声道数 × 帧采样数 × 2 字节 (按 PCM 等价计算)
    pub fn pcm_frame_bound(&self) -> usize {
        usize::from(self.channels) * FRAME_SAMPLES * 2
    }
}
