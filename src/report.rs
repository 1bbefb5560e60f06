//! 诊断输出.
//!
//! 每个文件的处理结果通过 `Reporter` 报告, 而不是写死到某个全局输出流.
//! 默认实现转发到 tracing; 测试中可换成收集结果的实现.

use std::path::Path;

use tracing::{error, info};
use wav2mp3_core::ConvertError;

use crate::pipeline::FileReport;

/// 单文件处理结果的接收方
pub trait Reporter: Send + Sync {
    /// 文件已派发处理
    fn started(&self, input: &Path);

    /// 文件转换成功
    fn succeeded(&self, report: &FileReport);

    /// 文件转换失败, 错误归属于 `input`
    fn failed(&self, input: &Path, error: &ConvertError);
}

/// 输出到 tracing 的报告器
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn started(&self, input: &Path) {
        info!("正在处理: {}", input.display());
    }

    fn succeeded(&self, report: &FileReport) {
        info!(
            "完成: {} -> {} ({} 声道, {} Hz, {:.2} 秒, {} 帧, {} 字节)",
            report.input.display(),
            report.output.display(),
            report.channels,
            report.sample_rate,
            report.duration_secs,
            report.stats.chunks,
            report.stats.bytes_written,
        );
    }

    fn failed(&self, input: &Path, err: &ConvertError) {
        error!("{} [{}]: {}", input.display(), err.kind(), err);
    }
}
