//! 转换配置.
//!
//! 整个批处理共用一份配置, 运行期间不变.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wav2mp3_codec::DEFAULT_QUALITY;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertConfig {
    /// 待转换文件的扩展名 (不区分大小写)
    #[serde(default = "default_input_extension")]
    pub input_extension: String,
    /// 输出文件扩展名
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
    /// LAME 编码质量, 所有文件相同
    #[serde(default = "default_quality")]
    pub quality: u8,
}

fn default_input_extension() -> String {
    "wav".to_string()
}

fn default_output_extension() -> String {
    "mp3".to_string()
}

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_extension: default_input_extension(),
            output_extension: default_output_extension(),
            quality: default_quality(),
        }
    }
}

impl ConvertConfig {
    /// 输出路径: 与输入同目录同名, 替换扩展名
    pub fn output_path(&self, input: &Path) -> PathBuf {
        input.with_extension(&self.output_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_默认配置() {
        let config = ConvertConfig::default();
        assert_eq!(config.input_extension, "wav");
        assert_eq!(config.output_extension, "mp3");
        assert_eq!(config.quality, 6);
    }

    #[test]
    fn test_输出路径替换扩展名() {
        let config = ConvertConfig::default();
        assert_eq!(
            config.output_path(Path::new("music/track01.WAV")),
            PathBuf::from("music/track01.mp3")
        );
        assert_eq!(
            config.output_path(Path::new("a.b.wav")),
            PathBuf::from("a.b.mp3")
        );
    }
}
