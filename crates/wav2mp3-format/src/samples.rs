//! PCM 数据读取.

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use wav2mp3_core::{ConvertError, ConvertResult};

use crate::wav::WavHeader;

/// 文件主体中的原始 PCM 字节, 长度恰好等于头中声明的数据长度
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    bytes: Vec<u8>,
    frame_size: usize,
}

impl SampleBuffer {
    /// 读取头部声明长度的 PCM 数据
    ///
    /// 流中实际数据少于声明长度时返回 `ShortRead`.
    /// 缓冲区随实际读到的数据增长, 不按头中声明的长度预分配.
    pub fn read<R: Read + ?Sized>(reader: &mut R, header: &WavHeader) -> ConvertResult<Self> {
        let expected = header.data_len();
        let mut bytes = Vec::new();
        reader
            .take(expected as u64)
            .read_to_end(&mut bytes)
            .map_err(ConvertError::ReadFailed)?;
        if bytes.len() != expected {
            return Err(ConvertError::ShortRead {
                expected,
                actual: bytes.len(),
            });
        }
        debug!("读取 PCM 数据 {} 字节", bytes.len());
        Ok(Self {
            bytes,
            frame_size: header.frame_size(),
        })
    }

    /// 原始字节
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 完整采样组数
    pub fn sample_groups(&self) -> usize {
        match self.frame_size {
            0 => 0,
            frame_size => self.bytes.len() / frame_size,
        }
    }

    /// 解码为小端 16 位交织采样, 不足一个采样组的尾部字节被忽略
    pub fn to_pcm_s16(&self) -> Vec<i16> {
        let usable = self.sample_groups() * self.frame_size;
        let usable = usable - usable % 2;
        let mut pcm = vec![0i16; usable / 2];
        LittleEndian::read_i16_into(&self.bytes[..usable], &mut pcm);
        pcm
    }
}
