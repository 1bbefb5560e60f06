//! 编码器 trait 定义.
//!
//! 外部编码引擎通过 `EncoderFactory` 创建并配置, 得到的 `FrameEncoder`
//! 即一个已配置的引擎实例. 实例被释放 (drop) 即视为引擎销毁.

use wav2mp3_core::ConvertResult;

use crate::encoder_params::EncoderParams;

/// 已配置的编码器实例
///
/// 三个方法都把编码产物追加到 `out` 的尾部, 并返回本次追加的字节数.
/// 调用方负责在每次调用前清空 `out` 并预留足够容量.
pub trait FrameEncoder {
    /// 编码一帧单声道采样, `pcm.len()` 即采样数
    fn encode_mono(&mut self, pcm: &[i16], out: &mut Vec<u8>) -> ConvertResult<usize>;

    /// 编码一帧交织采样, 采样组数为 `pcm.len() / 声道数`
    fn encode_interleaved(&mut self, pcm: &[i16], out: &mut Vec<u8>) -> ConvertResult<usize>;

    /// 刷新编码器, 取出内部缓存的剩余码流
    fn flush(&mut self, out: &mut Vec<u8>) -> ConvertResult<usize>;
}

/// 编码器工厂
///
/// 对应外部引擎的 "创建会话 + 设置参数 + 完成配置" 三步.
/// 参数不被引擎接受时返回 `ConvertError::EncoderInit`.
pub trait EncoderFactory: Send + Sync {
    /// 引擎名称
    fn name(&self) -> &str;

    /// 创建并配置一个编码器实例
    fn open(&self, params: &EncoderParams) -> ConvertResult<Box<dyn FrameEncoder>>;

    /// 编码 `samples` 个采样组时引擎可能产出的最大字节数
    ///
    /// 默认返回 0, 表示没有比 PCM 等价上界更严格的要求.
    fn max_output_len(&self, _samples: usize) -> usize {
        0
    }
}
