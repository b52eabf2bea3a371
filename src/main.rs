//! Homework Bot CLI - 轮询作业评审状态并推送 Telegram 通知

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use homework_bot::{Config, HomeworkBot, PracticumClient, SystemClock, TelegramChannel};

#[derive(Parser)]
#[command(name = "hwbot")]
#[command(about = "Poll Practicum homework review statuses and notify a Telegram chat")]
#[command(version)]
struct Cli {
    /// 轮询间隔（秒）
    #[arg(long, short)]
    interval: Option<u64>,

    /// HTTP 请求超时（秒）
    #[arg(long)]
    timeout: Option<u64>,

    /// 只执行一个轮询周期后退出（冒烟测试用）
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // 缺少必需密钥是启动致命错误，不进入循环
            error!(error = %e, "configuration is incomplete, shutting down");
            std::process::exit(1);
        }
    };
    if let Some(interval) = cli.interval {
        config.retry_secs = interval;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    info!(
        endpoint = %config.endpoint,
        interval_secs = config.retry_secs,
        "starting homework bot"
    );

    let api = PracticumClient::new(&config)?;
    let sink = TelegramChannel::new(&config)?;
    let mut bot = HomeworkBot::new(
        api,
        sink,
        SystemClock,
        Duration::from_secs(config.retry_secs),
    );

    if cli.once {
        bot.poll_once().await;
        return Ok(());
    }

    bot.run().await;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("homework_bot=info,hwbot=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}
