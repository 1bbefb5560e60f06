//! 批处理调度.
//!
//! 枚举目录下的 WAV 文件, 每个文件派发一个阻塞任务 (tokio 阻塞线程池),
//! 任务之间不共享任何可变状态. 所有任务结束后才返回汇总结果.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use wav2mp3_codec::EncoderFactory;
use wav2mp3_core::{ConvertError, ConvertResult, ErrorKind};
use wav2mp3_format::has_extension;

use crate::config::ConvertConfig;
use crate::pipeline::convert_file;
use crate::report::Reporter;

/// 批处理汇总
#[derive(Debug, Default, Clone)]
pub struct BatchSummary {
    /// 派发的任务数
    pub dispatched: usize,
    /// 转换成功的输入文件
    pub succeeded: Vec<PathBuf>,
    /// 转换失败的输入文件及错误类别
    pub failed: Vec<(PathBuf, ErrorKind)>,
    /// 任务异常终止 (panic) 的输入文件
    pub panicked: Vec<PathBuf>,
}

impl BatchSummary {
    /// 所有任务都成功
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.panicked.is_empty()
    }
}

/// 列出 `root` 下 (不递归) 扩展名匹配的普通文件, 按路径排序
///
/// 无法检查的目录项记录警告后跳过.
pub fn list_candidates(root: &Path, extension: &str) -> ConvertResult<Vec<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("跳过无法读取的目录项: {e}");
                continue;
            }
        };
        let path = entry.path();
        if !has_extension(&path, extension) {
            continue;
        }
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => candidates.push(path),
            Ok(_) => debug!("跳过非普通文件: {}", path.display()),
            Err(e) => warn!("跳过无法检查的文件 {}: {e}", path.display()),
        }
    }
    candidates.sort();
    Ok(candidates)
}

/// 转换 `root` 下所有 WAV 文件
///
/// 只有目录本身无法枚举时返回错误; 单个文件的失败通过 `reporter` 报告,
/// 并记录在汇总中.
pub async fn convert_dir(
    root: &Path,
    config: Arc<ConvertConfig>,
    factory: Arc<dyn EncoderFactory>,
    reporter: Arc<dyn Reporter>,
) -> ConvertResult<BatchSummary> {
    let candidates = list_candidates(root, &config.input_extension)?;
    info!(
        "{}: 找到 {} 个 .{} 文件, 编码器 {}",
        root.display(),
        candidates.len(),
        config.input_extension,
        factory.name(),
    );

    let mut tasks = JoinSet::new();
    let mut pending = HashMap::with_capacity(candidates.len());
    for input in candidates {
        let config = Arc::clone(&config);
        let factory = Arc::clone(&factory);
        let reporter = Arc::clone(&reporter);
        let path = input.clone();
        let handle = tasks.spawn_blocking(move || {
            reporter.started(&input);
            let outcome = match convert_file(&input, factory.as_ref(), &config) {
                Ok(report) => {
                    reporter.succeeded(&report);
                    Ok(())
                }
                Err(e) => {
                    reporter.failed(&input, &e);
                    Err(e.kind())
                }
            };
            (input, outcome)
        });
        pending.insert(handle.id(), path);
    }

    let mut summary = BatchSummary {
        dispatched: pending.len(),
        ..Default::default()
    };
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((id, (input, outcome))) => {
                pending.remove(&id);
                match outcome {
                    Ok(()) => summary.succeeded.push(input),
                    Err(kind) => summary.failed.push((input, kind)),
                }
            }
            Err(e) => {
                let Some(input) = pending.remove(&e.id()) else {
                    error!("未知任务异常终止: {e}");
                    continue;
                };
                let err = ConvertError::Encode(format!("转换任务异常终止: {e}"));
                reporter.failed(&input, &err);
                summary.panicked.push(input);
            }
        }
    }

    info!(
        "批处理结束: 派发 {}, 成功 {}, 失败 {}, 异常 {}",
        summary.dispatched,
        summary.succeeded.len(),
        summary.failed.len(),
        summary.panicked.len(),
    );
    Ok(summary)
}
