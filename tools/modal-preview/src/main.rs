//! # Modal Preview
//!
//! 弹窗预览工具：读取实例配置与触发链接，回放一段输入，
//! 输出最终的弹窗 HTML、状态或完整指令序列。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p modal-preview -- links.json
//! cargo run -p modal-preview -- links.json --options options.json --script open:1,next,prev
//! cargo run -p modal-preview -- links.json --allow youtube --deny vimeo --script open:0 --format json
//! cargo run -p modal-preview -- links.json --width 400 --height 800 --script open:0 -vv
//! ```

mod preview;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{Level, info};
use videos_modal::{Provider, Viewport};

use crate::preview::{Preview, consent_gate, load_links, load_options};
use crate::script::parse_script;

#[derive(Parser)]
#[command(name = "modal-preview")]
#[command(about = "弹窗预览工具 - 回放输入并输出弹窗 HTML")]
#[command(version)]
struct Cli {
    /// 触发链接列表（JSON 数组）
    links: PathBuf,

    /// 实例配置（JSON 对象）
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// 同意网关允许的 Provider，逗号分隔
    #[arg(long, value_delimiter = ',')]
    allow: Vec<Provider>,

    /// 同意网关拒绝的 Provider，逗号分隔
    #[arg(long, value_delimiter = ',')]
    deny: Vec<Provider>,

    /// 窗口宽度
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// 窗口高度
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// 输入脚本，如 `open:1,next,prev,escape`
    #[arg(short, long, default_value = "")]
    script: String,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// 日志详细程度（-v / -vv）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// 弹窗根节点 HTML
    Html,
    /// 控制器状态
    State,
    /// 全部指令与最终状态
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = real_main(&cli) {
        eprintln!("modal-preview error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn real_main(cli: &Cli) -> anyhow::Result<()> {
    let options = load_options(cli.options.as_deref())?;
    let links = load_links(&cli.links)?;
    let steps = parse_script(&cli.script)?;
    let gate = consent_gate(&cli.allow, &cli.deny);
    info!(links = links.len(), steps = steps.len(), gate = gate.is_some(), "开始预览");

    let mut preview = Preview::new(
        options,
        links,
        gate,
        Viewport::new(cli.width, cli.height),
    );
    preview.run(&steps)?;

    match cli.format {
        Format::Html => println!("{}", preview.view().to_html()),
        Format::State => println!("{}", serde_json::to_string_pretty(preview.state())?),
        Format::Json => {
            let output = serde_json::json!({
                "commands": preview.commands(),
                "state": preview.state(),
                "consent_panel_openings": preview.panel_openings(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
