//! 读取辅助.
//!
//! 区分 "读取出错" 与 "数据不足" 两种失败.

use std::io::{self, Read};

use wav2mp3_core::{ConvertError, ConvertResult};

/// 尽量读满 `buf`, 返回实际读到的字节数
///
/// 遇到 EOF 时提前返回, `Interrupted` 自动重试, 其他错误原样返回.
pub fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total_read = 0;
    while total_read < buf.len() {
        match reader.read(&mut buf[total_read..]) {
            Ok(0) => break,
            Ok(n) => total_read += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total_read)
}

/// 精确读满 `buf`
///
/// - 读取出错: `ConvertError::ReadFailed`
/// - 读到的字节不足: `ConvertError::ShortRead`
pub fn read_exact_or_short<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> ConvertResult<()> {
    let actual = read_full(reader, buf).map_err(ConvertError::ReadFailed)?;
    if actual != buf.len() {
        return Err(ConvertError::ShortRead {
            expected: buf.len(),
            actual,
        });
    }
    Ok(())
}
