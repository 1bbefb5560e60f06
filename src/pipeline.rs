//! 单文件转换管线.
//!
//! 打开输入 → 解析头 → 读取 PCM → 打开输出 → 分帧编码.
//! 输出文件在编码会话创建之前打开, 打开失败时不会产生任何编码器配置工作.
//! 因此编码器拒绝参数 (`EncoderInit`) 时, 输出路径上会留下一个空文件.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::debug;
use wav2mp3_codec::{EncodeStats, EncoderFactory, FrameDriver};
use wav2mp3_core::{ConvertError, ConvertResult};
use wav2mp3_format::{SampleBuffer, WavHeader};

use crate::config::ConvertConfig;

/// 单个文件的转换结果
#[derive(Debug, Clone)]
pub struct FileReport {
    /// 输入 WAV 路径
    pub input: PathBuf,
    /// 输出 MP3 路径
    pub output: PathBuf,
    /// 声道数
    pub channels: u16,
    /// 采样率 (Hz)
    pub sample_rate: u32,
    /// 时长 (秒)
    pub duration_secs: f64,
    /// 编码统计
    pub stats: EncodeStats,
}

/// 转换单个 WAV 文件
///
/// 编码中途写入失败时, 已写出的部分输出保持原样, 不做清理.
pub fn convert_file(
    input: &Path,
    factory: &dyn EncoderFactory,
    config: &ConvertConfig,
) -> ConvertResult<FileReport> {
    let mut wav = File::open(input).map_err(ConvertError::ReadFailed)?;
    let header = WavHeader::read(&mut wav)?;
    let samples = SampleBuffer::read(&mut wav, &header)?;
    drop(wav);

    let output = config.output_path(input);
    let mut mp3 = open_output(&output)?;
    debug!("输出: {}", output.display());

    let params = header.encoder_params().with_quality(config.quality);
    let pcm = samples.to_pcm_s16();
    let stats = FrameDriver::new(factory).encode(&params, &pcm, &mut mp3)?;

    Ok(FileReport {
        input: input.to_path_buf(),
        output,
        channels: header.channels(),
        sample_rate: header.sample_rate(),
        duration_secs: header.duration_secs(),
        stats,
    })
}

/// 以追加方式打开 (必要时创建) 输出文件
fn open_output(path: &Path) -> ConvertResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ConvertError::OpenOutput {
            path: path.to_path_buf(),
            source,
        })
}
