//! 声道模式定义.
//!
//! 编码器只区分单声道与交织立体声两种输入布局.

use std::fmt;

/// 声道模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// 单声道
    Mono,
    /// 立体声 (左右交织存储)
    Stereo,
}

impl ChannelMode {
    /// 根据声道数推导声道模式: 1 为单声道, 其余按交织输入处理
    pub fn from_channels(channels: u16) -> Self {
        if channels == 1 {
            Self::Mono
        } else {
            Self::Stereo
        }
    }

    /// 是否为单声道
    pub fn is_mono(&self) -> bool {
        matches!(self, Self::Mono)
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mono => write!(f, "mono"),
            Self::Stereo => write!(f, "stereo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_从声道数推导() {
        assert_eq!(ChannelMode::from_channels(1), ChannelMode::Mono);
        assert_eq!(ChannelMode::from_channels(2), ChannelMode::Stereo);
        assert!(ChannelMode::Mono.is_mono());
        assert!(!ChannelMode::Stereo.is_mono());
        assert_eq!(ChannelMode::Stereo.to_string(), "stereo");
    }
}
