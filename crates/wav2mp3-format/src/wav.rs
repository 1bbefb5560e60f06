//! RIFF/WAVE 头解析.
//!
//! 一次读取固定 44 字节, 逐字段按小端解码后校验.

use std::fmt;
use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use wav2mp3_codec::EncoderParams;
use wav2mp3_core::{ChannelMode, ConvertError, ConvertResult};

use crate::io::read_exact_or_short;

/// 标准 WAV 头长度
pub const WAV_HEADER_SIZE: usize = 44;

/// WAV PCM 格式码
const WAV_FORMAT_PCM: u16 = 0x0001;
/// 唯一支持的位深
const SUPPORTED_BITS_PER_SAMPLE: u16 = 16;

/// 四字符标签
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

/// WAV 文件头, 解析后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    /// "RIFF"
    pub riff_tag: FourCc,
    /// 文件总大小 - 8
    pub riff_size: u32,
    /// "WAVE"
    pub wave_tag: FourCc,
    /// "fmt "
    pub fmt_tag: FourCc,
    /// fmt 块长度
    pub fmt_size: u32,
    /// 格式码, PCM 为 1
    pub audio_format: u16,
    /// 声道数
    pub channels: u16,
    /// 采样率 (Hz)
    pub sample_rate: u32,
    /// 每秒字节数
    pub byte_rate: u32,
    /// 每个采样组的字节数 (block_align)
    pub block_align: u16,
    /// 位深
    pub bits_per_sample: u16,
    /// "data"
    pub data_tag: FourCc,
    /// PCM 数据字节数
    pub data_size: u32,
}

impl WavHeader {
    /// 从流中读取并校验 44 字节头, 读取游标停在 PCM 数据起始处
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> ConvertResult<Self> {
        let mut buf = [0u8; WAV_HEADER_SIZE];
        read_exact_or_short(reader, &mut buf)?;
        let header = Self::decode(&buf);
        header.validate()?;

        debug!(
            "WAV 头: format={}, channels={}, rate={}, block_align={}, bits={}, data={} 字节",
            header.audio_format,
            header.channels,
            header.sample_rate,
            header.block_align,
            header.bits_per_sample,
            header.data_size,
        );
        Ok(header)
    }

    /// 逐字段按小端解码, 不做任何校验
    pub fn decode(buf: &[u8; WAV_HEADER_SIZE]) -> Self {
        let tag = |offset: usize| {
            let mut t = [0u8; 4];
            t.copy_from_slice(&buf[offset..offset + 4]);
            FourCc(t)
        };
        Self {
            riff_tag: tag(0),
            riff_size: LittleEndian::read_u32(&buf[4..8]),
            wave_tag: tag(8),
            fmt_tag: tag(12),
            fmt_size: LittleEndian::read_u32(&buf[16..20]),
            audio_format: LittleEndian::read_u16(&buf[20..22]),
            channels: LittleEndian::read_u16(&buf[22..24]),
            sample_rate: LittleEndian::read_u32(&buf[24..28]),
            byte_rate: LittleEndian::read_u32(&buf[28..32]),
            block_align: LittleEndian::read_u16(&buf[32..34]),
            bits_per_sample: LittleEndian::read_u16(&buf[34..36]),
            data_tag: tag(36),
            data_size: LittleEndian::read_u32(&buf[40..44]),
        }
    }

    /// 校验标签、格式码与位深
    pub fn validate(&self) -> ConvertResult<()> {
        let tags = [
            (self.riff_tag, b"RIFF"),
            (self.wave_tag, b"WAVE"),
            (self.fmt_tag, b"fmt "),
            (self.data_tag, b"data"),
        ];
        for (found, expected) in tags {
            if &found.0 != expected {
                return Err(ConvertError::Format(format!(
                    "标签应为 {:?}, 实际为 {:?}",
                    String::from_utf8_lossy(expected),
                    found
                )));
            }
        }
        if self.audio_format != WAV_FORMAT_PCM {
            return Err(ConvertError::Format(format!(
                "不是 PCM 格式: 格式码 0x{:04X}",
                self.audio_format
            )));
        }
        if self.bits_per_sample != SUPPORTED_BITS_PER_SAMPLE {
            return Err(ConvertError::Format(format!(
                "不支持的位深: {}",
                self.bits_per_sample
            )));
        }
        if self.channels == 0 || self.block_align == 0 {
            return Err(ConvertError::Format(format!(
                "声道数 {} 或块对齐 {} 为 0",
                self.channels, self.block_align
            )));
        }
        // 采样组按声道交织存储, 每个采样 2 字节
        if u32::from(self.block_align) != u32::from(self.channels) * 2 {
            return Err(ConvertError::Format(format!(
                "块对齐 {} 与 {} 声道 16 位不一致",
                self.block_align, self.channels
            )));
        }
        Ok(())
    }

    /// 声道数
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// 采样率 (Hz)
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// 每个采样组的字节数
    pub fn frame_size(&self) -> usize {
        usize::from(self.block_align)
    }

    /// PCM 数据字节数
    pub fn data_len(&self) -> usize {
        self.data_size as usize
    }

    pub fn is_mono(&self) -> bool {
        self.channels == 1
    }

    /// 声道模式
    pub fn channel_mode(&self) -> ChannelMode {
        ChannelMode::from_channels(self.channels)
    }

    /// 采样组总数 = 数据字节数 / 每组字节数
    pub fn sample_groups(&self) -> usize {
        match self.frame_size() {
            0 => 0,
            frame_size => self.data_len() / frame_size,
        }
    }

    /// 时长 (秒)
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_groups() as f64 / f64::from(self.sample_rate)
    }

    /// 编码参数: 输出采样率等于输入, 质量取固定值
    pub fn encoder_params(&self) -> EncoderParams {
        EncoderParams::new(self.channels, self.sample_rate)
    }
}
