//! 分帧编码驱动.
//!
//! 把整段 PCM 采样按 1152 采样组切分送入编码会话, 每帧的产出立即写入输出,
//! 全部送完后刷新一次编码器.
//!
//! ```text
//! 单声道: |<- 1152 ->|<- 1152 ->|<- 余数 ->|
//! 立体声: |<- 1152 × 2 交织采样 ->|<- 1152 × 2 ->|<- 余数 × 2 ->|
//! ```

use std::io::Write;

use log::debug;
use wav2mp3_core::{ConvertError, ConvertResult};

use crate::encoder::EncoderFactory;
use crate::encoder_params::{EncoderParams, FRAME_SAMPLES};
use crate::session::EncoderSession;

/// 单个文件的编码统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// 编码调用次数 (不含刷新)
    pub chunks: usize,
    /// 已送入的采样组数
    pub sample_groups: usize,
    /// 已送入的采样数 (采样组数 × 声道数)
    pub sample_units: usize,
    /// 写入输出的总字节数 (含刷新)
    pub bytes_written: u64,
    /// 刷新产出的字节数
    pub flush_bytes: usize,
}

/// 分帧编码驱动
pub struct FrameDriver<'a> {
    factory: &'a dyn EncoderFactory,
}

impl<'a> FrameDriver<'a> {
    pub fn new(factory: &'a dyn EncoderFactory) -> Self {
        Self { factory }
    }

    /// 输出缓冲区容量: PCM 等价上界与引擎要求两者取大
    pub fn accumulator_capacity(&self, params: &EncoderParams) -> usize {
        params
            .pcm_frame_bound()
            .max(self.factory.max_output_len(FRAME_SAMPLES))
    }

    /// 编码整段交织 PCM 采样并写入 `sink`
    ///
    /// 不足一个采样组的尾部采样被忽略. 会话在返回前 (无论成功与否) 关闭.
    pub fn encode<W: Write>(
        &self,
        params: &EncoderParams,
        pcm: &[i16],
        sink: &mut W,
    ) -> ConvertResult<EncodeStats> {
        let mut session = EncoderSession::open(self.factory, params)?;

        let channels = usize::from(params.channels);
        let sample_groups = pcm.len() / channels;
        let units = sample_groups * channels;
        let step = FRAME_SAMPLES * channels;

        let mut stats = EncodeStats::default();
        let mut out = Vec::with_capacity(self.accumulator_capacity(params));

        debug!(
            "开始分帧编码: {} 采样组, 每帧 {} 采样, 预计 {} 帧",
            sample_groups,
            step,
            sample_groups.div_ceil(FRAME_SAMPLES),
        );

        for chunk in pcm[..units].chunks(step) {
            out.clear();
            let encoded = session.encode_chunk(chunk, &mut out)?;
            stats.chunks += 1;
            stats.sample_groups += chunk.len() / channels;
            stats.sample_units += chunk.len();
            stats.bytes_written += write_encoded(sink, &out, encoded)? as u64;
        }

        out.clear();
        let flushed = session.flush(&mut out)?;
        stats.flush_bytes = flushed;
        stats.bytes_written += write_encoded(sink, &out, flushed)? as u64;

        session.close();
        Ok(stats)
    }
}

/// 把本次产出的前 `encoded` 字节写入输出, 返回写入字节数
fn write_encoded<W: Write>(sink: &mut W, out: &[u8], encoded: usize) -> ConvertResult<usize> {
    if encoded == 0 {
        return Ok(0);
    }
    let bytes = out.get(..encoded).ok_or_else(|| {
        ConvertError::Encode(format!(
            "编码器报告 {} 字节, 但缓冲区只有 {} 字节",
            encoded,
            out.len()
        ))
    })?;
    sink.write_all(bytes).map_err(ConvertError::WriteFailed)?;
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::mock::{Call, MockFactory};

    /// 总是写入失败的输出
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("磁盘已满"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn chunk_sizes(calls: &[Call]) -> Vec<usize> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::Mono(n) | Call::Interleaved(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    fn flush_count(calls: &[Call]) -> usize {
        calls.iter().filter(|c| **c == Call::Flush).count()
    }

    #[test]
    fn test_帧数为向上取整() {
        for groups in [1usize, 1151, 1152, 1153, 2304, 5000] {
            let factory = MockFactory::new();
            let pcm = vec![0i16; groups];
            let stats = FrameDriver::new(&factory)
                .encode(&EncoderParams::new(1, 44100), &pcm, &mut Vec::new())
                .unwrap();

            let sizes = chunk_sizes(&factory.calls());
            assert_eq!(sizes.len(), groups.div_ceil(FRAME_SAMPLES), "groups={groups}");
            assert_eq!(stats.chunks, sizes.len());
            let (last, full) = sizes.split_last().unwrap();
            assert!(full.iter().all(|n| *n == FRAME_SAMPLES));
            let expected_last = match groups % FRAME_SAMPLES {
                0 => FRAME_SAMPLES,
                rem => rem,
            };
            assert_eq!(*last, expected_last, "groups={groups}");
        }
    }

    #[test]
    fn test_立体声按交织采样推进() {
        let factory = MockFactory::new();
        let groups = 2000;
        let pcm = vec![0i16; groups * 2];
        let stats = FrameDriver::new(&factory)
            .encode(&EncoderParams::new(2, 44100), &pcm, &mut Vec::new())
            .unwrap();

        let calls = factory.calls();
        assert_eq!(chunk_sizes(&calls), vec![1152, 848]);
        assert!(calls.contains(&Call::Interleaved(1152)));
        assert_eq!(flush_count(&calls), 1);
        assert_eq!(stats.sample_groups, groups);
        assert_eq!(stats.sample_units, pcm.len());
    }

    #[test]
    fn test_单声道按采样推进() {
        let factory = MockFactory::new();
        let pcm = vec![0i16; 3000];
        let stats = FrameDriver::new(&factory)
            .encode(&EncoderParams::new(1, 44100), &pcm, &mut Vec::new())
            .unwrap();

        assert_eq!(chunk_sizes(&factory.calls()), vec![1152, 1152, 696]);
        assert!(factory.calls().contains(&Call::Mono(1152)));
        assert_eq!(stats.sample_units, 3000);
    }

    #[test]
    fn test_采样无重叠无遗漏() {
        // 采样值即其下标, 逐帧拼接后应与原序列完全一致
        struct Collect(Vec<i16>);
        impl crate::encoder::FrameEncoder for Collect {
            fn encode_mono(&mut self, pcm: &[i16], _out: &mut Vec<u8>) -> ConvertResult<usize> {
                self.0.extend_from_slice(pcm);
                Ok(0)
            }
            fn encode_interleaved(
                &mut self,
                pcm: &[i16],
                _out: &mut Vec<u8>,
            ) -> ConvertResult<usize> {
                self.0.extend_from_slice(pcm);
                Ok(0)
            }
            fn flush(&mut self, _out: &mut Vec<u8>) -> ConvertResult<usize> {
                Ok(0)
            }
        }
        impl Drop for Collect {
            fn drop(&mut self) {
                let expected: Vec<i16> = (0..5000).map(|i| i as i16).collect();
                assert_eq!(self.0, expected);
            }
        }
        struct CollectFactory;
        impl EncoderFactory for CollectFactory {
            fn name(&self) -> &str {
                "collect"
            }
            fn open(
                &self,
                _params: &EncoderParams,
            ) -> ConvertResult<Box<dyn crate::encoder::FrameEncoder>> {
                Ok(Box::new(Collect(Vec::new())))
            }
        }

        let pcm: Vec<i16> = (0..5000).map(|i| i as i16).collect();
        let stats = FrameDriver::new(&CollectFactory)
            .encode(&EncoderParams::new(2, 48000), &pcm, &mut Vec::new())
            .unwrap();
        assert_eq!(stats.sample_units, 5000);
        assert_eq!(stats.chunks, 3);
    }

    #[test]
    fn test_零帧也要刷新一次() {
        let factory = MockFactory::new();
        let mut sink = Vec::new();
        let stats = FrameDriver::new(&factory)
            .encode(&EncoderParams::new(2, 44100), &[], &mut sink)
            .unwrap();

        let calls = factory.calls();
        assert_eq!(stats.chunks, 0);
        assert_eq!(flush_count(&calls), 1);
        assert_eq!(calls.last(), Some(&Call::Close));
        assert_eq!(sink.len(), 50);
    }

    #[test]
    fn test_单帧也要刷新一次() {
        let factory = MockFactory::new();
        let stats = FrameDriver::new(&factory)
            .encode(&EncoderParams::new(1, 44100), &[0; 10], &mut Vec::new())
            .unwrap();
        assert_eq!(stats.chunks, 1);
        assert_eq!(flush_count(&factory.calls()), 1);
    }

    #[test]
    fn test_输出流式写入() {
        let factory = MockFactory::with_output(7, 3);
        let mut sink = Vec::new();
        let stats = FrameDriver::new(&factory)
            .encode(&EncoderParams::new(1, 44100), &[0; 2304], &mut sink)
            .unwrap();
        assert_eq!(sink.len(), 7 + 7 + 3);
        assert_eq!(stats.bytes_written, 17);
        assert_eq!(stats.flush_bytes, 3);
    }

    #[test]
    fn test_零字节产出不写入() {
        let factory = MockFactory::with_output(0, 0);
        let mut sink = Vec::new();
        FrameDriver::new(&factory)
            .encode(&EncoderParams::new(1, 44100), &[0; 100], &mut sink)
            .unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_写入失败中止并关闭会话() {
        let factory = MockFactory::new();
        let err = FrameDriver::new(&factory)
            .encode(&EncoderParams::new(1, 44100), &[0; 3000], &mut BrokenSink)
            .unwrap_err();
        assert!(matches!(err, ConvertError::WriteFailed(_)));

        let calls = factory.calls();
        assert_eq!(chunk_sizes(&calls), vec![1152]);
        assert_eq!(flush_count(&calls), 0);
        assert_eq!(calls.last(), Some(&Call::Close));
    }

    #[test]
    fn test_奇数尾部采样被忽略() {
        let factory = MockFactory::new();
        let stats = FrameDriver::new(&factory)
            .encode(&EncoderParams::new(2, 44100), &[0; 7], &mut Vec::new())
            .unwrap();
        assert_eq!(stats.sample_groups, 3);
        assert_eq!(stats.sample_units, 6);
    }

    #[test]
    fn test_缓冲区容量取较大值() {
        struct Greedy;
        impl EncoderFactory for Greedy {
            fn name(&self) -> &str {
                "greedy"
            }
            fn open(
                &self,
                _params: &EncoderParams,
            ) -> ConvertResult<Box<dyn crate::encoder::FrameEncoder>> {
                Err(ConvertError::EncoderInit("不用".into()))
            }
            fn max_output_len(&self, samples: usize) -> usize {
                samples * 10
            }
        }
        let params = EncoderParams::new(2, 44100);
        assert_eq!(
            FrameDriver::new(&MockFactory::new()).accumulator_capacity(&params),
            4608
        );
        assert_eq!(FrameDriver::new(&Greedy).accumulator_capacity(&params), 11520);
    }
}
