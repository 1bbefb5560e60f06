//! 按扩展名识别 WAV 文件.

use std::path::Path;

/// 扩展名 (不区分大小写) 是否等于 `extension`
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// 是否为 `.wav` 文件
pub fn is_wav_path(path: &Path) -> bool {
    has_extension(path, "wav")
}
