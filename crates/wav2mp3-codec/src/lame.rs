//! 基于 LAME 的 MP3 编码器.
//!
//! 通过 `mp3lame-encoder` 调用 libmp3lame. 引擎句柄由 `mp3lame_encoder::Encoder`
//! 持有, 其 `Drop` 负责 `lame_close`.

use std::fmt::Debug;
use std::num::NonZeroU32;

use log::debug;
use mp3lame_encoder::{Builder, Encoder, FlushGap, InterleavedPcm, Mode, MonoPcm, Quality};
use wav2mp3_core::{ChannelMode, ConvertError, ConvertResult};

use crate::encoder::{EncoderFactory, FrameEncoder};
use crate::encoder_params::EncoderParams;

/// LAME 编码器工厂
#[derive(Debug, Default, Clone, Copy)]
pub struct LameFactory;

impl LameFactory {
    pub fn new() -> Self {
        Self
    }
}

impl EncoderFactory for LameFactory {
    fn name(&self) -> &str {
        "libmp3lame"
    }

    fn open(&self, params: &EncoderParams) -> ConvertResult<Box<dyn FrameEncoder>> {
        if params.out_sample_rate != params.in_sample_rate {
            return Err(ConvertError::EncoderInit(format!(
                "不支持重采样: {} Hz -> {} Hz",
                params.in_sample_rate, params.out_sample_rate
            )));
        }
        let channels = match params.channels {
            1 => 1u8,
            2 => 2u8,
            n => {
                return Err(ConvertError::EncoderInit(format!(
                    "LAME 只支持 1 或 2 声道, 实际 {n}"
                )));
            }
        };

        let mut builder = Builder::new()
            .ok_or_else(|| ConvertError::EncoderInit("lame_init() 失败".into()))?;
        builder.set_num_channels(channels).map_err(init_error)?;
        builder
            .set_sample_rate(params.in_sample_rate)
            .map_err(init_error)?;
        // 不设置时 LAME 会自行挑选输出采样率并重采样
        builder
            .set_output_sample_rate(NonZeroU32::new(params.out_sample_rate))
            .map_err(init_error)?;
        builder.set_mode(lame_mode(params.mode)).map_err(init_error)?;
        builder
            .set_quality(lame_quality(params.quality)?)
            .map_err(init_error)?;
        let inner = builder.build().map_err(init_error)?;

        debug!(
            "LAME 初始化完成: {} 声道, {} Hz, 质量 {}",
            channels, params.in_sample_rate, params.quality
        );
        Ok(Box::new(LameEncoder { inner }))
    }

    fn max_output_len(&self, samples: usize) -> usize {
        mp3lame_encoder::max_required_buffer_size(samples)
    }
}

/// 已配置的 LAME 实例
struct LameEncoder {
    inner: Encoder,
}

impl FrameEncoder for LameEncoder {
    fn encode_mono(&mut self, pcm: &[i16], out: &mut Vec<u8>) -> ConvertResult<usize> {
        self.inner
            .encode_to_vec(MonoPcm(pcm), out)
            .map_err(encode_error)
    }

    fn encode_interleaved(&mut self, pcm: &[i16], out: &mut Vec<u8>) -> ConvertResult<usize> {
        self.inner
            .encode_to_vec(InterleavedPcm(pcm), out)
            .map_err(encode_error)
    }

    fn flush(&mut self, out: &mut Vec<u8>) -> ConvertResult<usize> {
        self.inner
            .flush_to_vec::<FlushGap>(out)
            .map_err(encode_error)
    }
}

fn lame_mode(mode: ChannelMode) -> Mode {
    match mode {
        ChannelMode::Mono => Mode::Mono,
        ChannelMode::Stereo => Mode::Stereo,
    }
}

fn lame_quality(quality: u8) -> ConvertResult<Quality> {
    Ok(match quality {
        0 => Quality::Best,
        1 => Quality::SecondBest,
        2 => Quality::NearBest,
        3 => Quality::VeryNice,
        4 => Quality::Nice,
        5 => Quality::Good,
        6 => Quality::Decent,
        7 => Quality::Ok,
        8 => Quality::SecondWorst,
        9 => Quality::Worst,
        q => {
            return Err(ConvertError::EncoderInit(format!(
                "编码质量超出范围 0..=9: {q}"
            )));
        }
    })
}

fn init_error<E: Debug>(err: E) -> ConvertError {
    ConvertError::EncoderInit(format!("{err:?}"))
}

fn encode_error<E: Debug>(err: E) -> ConvertError {
    ConvertError::Encode(format!("{err:?}"))
}
