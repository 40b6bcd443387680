//! xhs-scrape command line
//!
//! Scrapes one note and prints it, or serves the HTTP API.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xhs_scrape::handlers::AppState;
use xhs_scrape::server::{self, ServerConfig};
use xhs_scrape::{Error, ExtractOptions, ExtractionResult, FetcherConfig, ScrapeService};

/// Xiaohongshu note scraper
#[derive(Parser, Debug)]
#[command(name = "xhs-scrape")]
#[command(version)]
#[command(about = "Scrape title, body and image URLs from a Xiaohongshu note")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Canonical note URL, or share text containing an xhslink.com link
    input: Option<String>,

    /// Also try heading, content-div and <img> heuristics
    #[arg(long, global = true)]
    extended: bool,

    /// Fetch timeout in milliseconds
    #[arg(long, global = true, default_value_t = xhs_scrape::fetch::config::DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP scrape API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Allow cross-origin requests from any origin
        #[arg(long)]
        permissive_cors: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_result(out: &mut impl Write, content: &ExtractionResult) -> io::Result<()> {
    writeln!(out, "\n--- 抓取结果 ---")?;
    writeln!(out, "标题: {}", content.title)?;
    writeln!(out, "\n正文:")?;
    writeln!(out, "{}", content.body)?;
    writeln!(out, "\n图片链接:")?;
    if content.image_urls.is_empty() {
        writeln!(out, "未找到图片链接。")?;
    } else {
        for url in &content.image_urls {
            writeln!(out, "{url}")?;
        }
    }
    writeln!(out, "---------------")
}

async fn run_scrape(
    service: &ScrapeService,
    input: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<ExitCode> {
    match service.scrape(input).await {
        Ok(outcome) => {
            writeln!(out, "正在抓取: {}", outcome.url)?;
            print_result(out, &outcome.content)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Unrecognized) => {
            writeln!(
                err,
                "错误：无法从输入中识别有效的小红书链接 (需要 https://www.xiaohongshu.com/... 或包含 https://xhslink.com/... 的文本)。"
            )?;
            writeln!(err, "收到的输入: {input}")?;
            Ok(ExitCode::from(1))
        }
        Err(e) => {
            writeln!(err, "抓取失败: {e}")?;
            Ok(ExitCode::from(2))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let fetcher_config = FetcherConfig::builder().timeout_ms(args.timeout_ms).build();
    let options = ExtractOptions {
        extended_fallbacks: args.extended,
    };
    let service = ScrapeService::with_fetcher_config(fetcher_config)
        .context("failed to build HTTP client")?
        .options(options);

    match args.command {
        Some(Command::Serve {
            port,
            host,
            permissive_cors,
        }) => {
            let config = ServerConfig {
                host,
                port,
                permissive_cors,
            };
            server::serve(config, Arc::new(AppState::new(service)))
                .await
                .context("server error")?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let Some(input) = args.input else {
                eprintln!("错误：缺少输入。用法: xhs-scrape <INPUT> 或 xhs-scrape serve");
                return Ok(ExitCode::from(1));
            };
            let code = run_scrape(
                &service,
                &input,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )
            .await?;
            Ok(code)
        }
    }
}
