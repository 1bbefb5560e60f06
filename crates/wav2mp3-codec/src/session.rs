//! 编码会话.
//!
//! 把外部引擎句柄包装为作用域资源:
//! `Created → Configured → Encoding → Flushed → Closed`.
//! 会话在 `Drop` 时释放引擎, 因此任何退出路径 (包括 `?` 提前返回)
//! 都恰好关闭一次.

use log::{debug, trace};
use wav2mp3_core::{ChannelMode, ConvertError, ConvertResult};

use crate::encoder::{EncoderFactory, FrameEncoder};
use crate::encoder_params::EncoderParams;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 已创建, 尚未配置
    Created,
    /// 已配置, 尚未送入任何帧
    Configured,
    /// 正在编码
    Encoding,
    /// 已刷新, 只允许关闭
    Flushed,
    /// 已关闭
    Closed,
}

/// 单个文件独占的编码会话
pub struct EncoderSession {
    encoder: Option<Box<dyn FrameEncoder>>,
    mode: ChannelMode,
    channels: usize,
    state: SessionState,
    chunks: usize,
}

impl EncoderSession {
    /// 创建并配置会话
    ///
    /// 引擎拒绝参数时返回 `EncoderInit`, 此时不存在需要释放的句柄.
    pub fn open(factory: &dyn EncoderFactory, params: &EncoderParams) -> ConvertResult<Self> {
        let mut session = Self {
            encoder: None,
            mode: params.mode,
            channels: usize::from(params.channels),
            state: SessionState::Created,
            chunks: 0,
        };

        if session.channels == 0 {
            return Err(ConvertError::EncoderInit("声道数为 0".into()));
        }

        session.encoder = Some(factory.open(params)?);
        session.state = SessionState::Configured;
        debug!(
            "{} 会话已配置: {} 声道 ({}), {} Hz -> {} Hz, 质量 {}",
            factory.name(),
            params.channels,
            params.mode,
            params.in_sample_rate,
            params.out_sample_rate,
            params.quality,
        );
        Ok(session)
    }

    /// 当前状态
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 已编码的帧数
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    /// 编码一帧
    ///
    /// 单声道时 `pcm` 即采样序列; 多声道时 `pcm` 为交织采样.
    pub fn encode_chunk(&mut self, pcm: &[i16], out: &mut Vec<u8>) -> ConvertResult<usize> {
        match self.state {
            SessionState::Configured | SessionState::Encoding => {}
            state => {
                return Err(ConvertError::InvalidState(format!(
                    "状态 {state:?} 下不能编码"
                )));
            }
        }
        if pcm.len() % self.channels != 0 {
            return Err(ConvertError::InvalidState(format!(
                "交织采样数 {} 不是声道数 {} 的整数倍",
                pcm.len(),
                self.channels
            )));
        }

        let mode = self.mode;
        let encoder = self.encoder_mut()?;
        let encoded = match mode {
            ChannelMode::Mono => encoder.encode_mono(pcm, out)?,
            ChannelMode::Stereo => encoder.encode_interleaved(pcm, out)?,
        };

        self.state = SessionState::Encoding;
        self.chunks += 1;
        trace!(
            "第 {} 帧: {} 采样组 -> {} 字节",
            self.chunks,
            pcm.len() / self.channels,
            encoded
        );
        Ok(encoded)
    }

    /// 刷新编码器, 每个会话只允许一次
    pub fn flush(&mut self, out: &mut Vec<u8>) -> ConvertResult<usize> {
        match self.state {
            SessionState::Configured | SessionState::Encoding => {}
            state => {
                return Err(ConvertError::InvalidState(format!(
                    "状态 {state:?} 下不能刷新"
                )));
            }
        }

        let flushed = self.encoder_mut()?.flush(out)?;
        self.state = SessionState::Flushed;
        debug!("编码器刷新: {} 帧之后输出 {} 字节", self.chunks, flushed);
        Ok(flushed)
    }

    /// 显式关闭会话
    pub fn close(self) {}

    fn encoder_mut(&mut self) -> ConvertResult<&mut Box<dyn FrameEncoder>> {
        self.encoder
            .as_mut()
            .ok_or_else(|| ConvertError::InvalidState("编码器句柄不存在".into()))
    }
}

impl Drop for EncoderSession {
    fn drop(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            drop(encoder);
            trace!("编码会话关闭, 关闭前状态 {:?}", self.state);
        }
        self.state = SessionState::Closed;
    }
}
