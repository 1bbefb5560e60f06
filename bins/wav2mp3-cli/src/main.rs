//! wav2mp3 - 批量 WAV → MP3 转换工具
//!
//! 用法: `wav2mp3 [-v...] <WAV 文件目录>`
//!
//! 目录下 (不递归) 每个 .wav 文件转换为同名 .mp3, 写在同一目录.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use tracing::error;

use wav2mp3::codec::LameFactory;
use wav2mp3::logging::{self, LoggingConfig};
use wav2mp3::{ConvertConfig, TracingReporter, convert_dir};

#[derive(Parser, Debug)]
#[command(name = "wav2mp3", version, about = "批量将 16 位 PCM WAV 转换为 MP3")]
struct Cli {
    /// 包含 WAV 文件的目录
    dir: Option<PathBuf>,

    /// 日志级别 (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let Some(dir) = cli.dir else {
        print_usage();
        return;
    };

    if let Err(e) = logging::init(&LoggingConfig::default(), cli.verbose) {
        eprintln!("警告: 日志初始化失败: {e:#}");
    }

    let summary = match convert_dir(
        &dir,
        Arc::new(ConvertConfig::default()),
        Arc::new(LameFactory::new()),
        Arc::new(TracingReporter),
    )
    .await
    {
        Ok(summary) => summary,
        Err(e) => {
            error!("无法读取目录 '{}': {e}", dir.display());
            eprintln!("错误: 无法读取目录 '{}': {e}", dir.display());
            process::exit(1);
        }
    };

    println!(
        "共 {} 个文件: 成功 {}, 失败 {}",
        summary.dispatched,
        summary.succeeded.len(),
        summary.failed.len() + summary.panicked.len(),
    );
    for (path, kind) in &summary.failed {
        println!("  [{kind}] {}", path.display());
    }
    for path in &summary.panicked {
        println!("  [panic] {}", path.display());
    }
}

fn print_usage() {
    let name = std::env::args()
        .next()
        .unwrap_or_else(|| Cli::command().get_name().to_string());
    println!("用法: {name} <WAV 文件目录>");
    println!();
    println!("{}", Cli::command().render_help());
}
