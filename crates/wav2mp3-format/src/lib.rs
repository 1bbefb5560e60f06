//! # wav2mp3-format
//!
//! 容器层, 负责读取 16 位 PCM WAV 文件.
//!
//! 只接受固定 44 字节头的标准布局:
//! ```text
//! RIFF header:  "RIFF" + file_size-8 + "WAVE"
//! fmt  chunk:   "fmt " + chunk_size + audio_format + channels + sample_rate
//!              + byte_rate + block_align + bits_per_sample
//! data chunk:   "data" + data_size + PCM samples...
//! ```

pub mod io;
pub mod probe;
pub mod samples;
pub mod wav;

// 重导出常用类型
pub use probe::{has_extension, is_wav_path};
pub use samples::SampleBuffer;
pub use wav::{WAV_HEADER_SIZE, WavHeader};
