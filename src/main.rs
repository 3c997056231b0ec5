//! # changedpi — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与结果输出，业务逻辑见 `lib.rs`。

use std::path::PathBuf;
use std::process::ExitCode;

use changedpi::{DpiConfig, DpiError, change_dpi_by_path, change_dpi_file};
use clap::Parser;

/// 改写 PNG/JPEG 图片的像素密度（DPI），不重新编码像素数据。
#[derive(Parser)]
#[command(name = "changedpi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 输入图片（.png / .jpg / .jpeg，其他后缀按文件签名识别）
    input: PathBuf,

    /// 目标密度（像素/英寸）
    #[arg(short, long)]
    dpi: u16,

    /// 输出图片路径；省略时把新的 Data URL 打印到标准输出
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), DpiError> {
    let config = cli
        .config
        .as_deref()
        .map(DpiConfig::load_from_path)
        .unwrap_or_default();
    config.validate()?;

    match cli.output {
        Some(output) => change_dpi_file(&cli.input, &output, cli.dpi, &config),
        None => {
            let data_url = change_dpi_by_path(&cli.input, cli.dpi, &config)?;
            println!("{}", data_url);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ 改写失败: {err}");
            ExitCode::FAILURE
        }
    }
}
