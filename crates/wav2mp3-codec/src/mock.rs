//! 测试用编码器: 记录每次调用, 输出固定长度的假码流.

use std::sync::{Arc, Mutex};

use wav2mp3_core::{ConvertError, ConvertResult};

use crate::encoder::{EncoderFactory, FrameEncoder};
use crate::encoder_params::EncoderParams;

/// 编码器收到的调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Open(EncoderParams),
    /// 单声道帧, 参数为采样组数
    Mono(usize),
    /// 交织帧, 参数为采样组数
    Interleaved(usize),
    Flush,
    Close,
}

pub(crate) struct MockFactory {
    calls: Arc<Mutex<Vec<Call>>>,
    reject: bool,
    chunk_bytes: usize,
    flush_bytes: usize,
}

impl MockFactory {
    pub(crate) fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reject: false,
            chunk_bytes: 100,
            flush_bytes: 50,
        }
    }

    pub(crate) fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::new()
        }
    }

    pub(crate) fn with_output(chunk_bytes: usize, flush_bytes: usize) -> Self {
        Self {
            chunk_bytes,
            flush_bytes,
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl EncoderFactory for MockFactory {
    fn name(&self) -> &str {
        "mock"
    }

    fn open(&self, params: &EncoderParams) -> ConvertResult<Box<dyn FrameEncoder>> {
        if self.reject {
            return Err(ConvertError::EncoderInit("参数被拒绝".into()));
        }
        self.calls.lock().unwrap().push(Call::Open(params.clone()));
        Ok(Box::new(MockEncoder {
            calls: Arc::clone(&self.calls),
            channels: usize::from(params.channels),
            chunk_bytes: self.chunk_bytes,
            flush_bytes: self.flush_bytes,
        }))
    }
}

struct MockEncoder {
    calls: Arc<Mutex<Vec<Call>>>,
    channels: usize,
    chunk_bytes: usize,
    flush_bytes: usize,
}

impl MockEncoder {
    fn emit(out: &mut Vec<u8>, len: usize) -> usize {
        out.extend(std::iter::repeat_n(0xAB, len));
        len
    }
}

impl FrameEncoder for MockEncoder {
    fn encode_mono(&mut self, pcm: &[i16], out: &mut Vec<u8>) -> ConvertResult<usize> {
        self.calls.lock().unwrap().push(Call::Mono(pcm.len()));
        Ok(Self::emit(out, self.chunk_bytes))
    }

    fn encode_interleaved(&mut self, pcm: &[i16], out: &mut Vec<u8>) -> ConvertResult<usize> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Interleaved(pcm.len() / self.channels));
        Ok(Self::emit(out, self.chunk_bytes))
    }

    fn flush(&mut self, out: &mut Vec<u8>) -> ConvertResult<usize> {
        self.calls.lock().unwrap().push(Call::Flush);
        Ok(Self::emit(out, self.flush_bytes))
    }
}

impl Drop for MockEncoder {
    fn drop(&mut self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Call::Close);
        }
    }
}
