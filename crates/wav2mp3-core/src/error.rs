//! 统一错误类型定义.
//!
//! 所有错误都只作用于单个文件: 批处理会报告错误并继续处理下一个文件.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 转换流程统一错误类型
#[derive(Debug, Error)]
pub enum ConvertError {
    /// 底层读取失败
    #[error("读取失败: {0}")]
    ReadFailed(#[source] io::Error),

    /// 数据不足, 流提前结束
    #[error("数据不足: 需要 {expected} 字节, 实际只读到 {actual} 字节")]
    ShortRead { expected: usize, actual: usize },

    /// 写入输出失败
    #[error("写入失败: {0}")]
    WriteFailed(#[source] io::Error),

    /// 无法打开输出文件
    #[error("无法打开输出文件 {}: {source}", path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 容器头校验失败
    #[error("格式错误: {0}")]
    Format(String),

    /// 编码器拒绝参数组合
    #[error("编码器初始化失败: {0}")]
    EncoderInit(String),

    /// 编码过程中编码器报错
    #[error("编码失败: {0}")]
    Encode(String),

    /// 编码会话状态错误 (如 flush 之后继续编码)
    #[error("编码会话状态错误: {0}")]
    InvalidState(String),

    /// 其他 I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),
}

/// 错误大类, 用于汇总与报告
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 文件打开/读取/写入失败, 包括短读
    Io,
    /// 容器头不合法
    Format,
    /// 编码器配置被拒绝
    EncoderInit,
    /// 编码器运行期错误
    Encode,
}

impl ConvertError {
    /// 归类到错误大类
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ReadFailed(_)
            | Self::ShortRead { .. }
            | Self::WriteFailed(_)
            | Self::OpenOutput { .. }
            | Self::Io(_) => ErrorKind::Io,
            Self::Format(_) => ErrorKind::Format,
            Self::EncoderInit(_) => ErrorKind::EncoderInit,
            Self::Encode(_) | Self::InvalidState(_) => ErrorKind::Encode,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Io => "IoError",
            Self::Format => "FormatError",
            Self::EncoderInit => "EncoderInitError",
            Self::Encode => "EncodeError",
        };
        f.write_str(name)
    }
}

/// 统一 Result 类型
pub type ConvertResult<T> = Result<T, ConvertError>;
