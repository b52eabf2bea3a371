//! 配置加载 - 从环境变量读取密钥和可选项
//!
//! 三个必需密钥缺任何一个都是启动致命错误（进程退出，不进入轮询循环）。

use std::env;

/// 默认轮询间隔（秒）
pub const DEFAULT_RETRY_SECS: u64 = 600;

/// 默认 HTTP 请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 默认作业状态 API 端点
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// 进程配置
#[derive(Debug, Clone)]
pub struct Config {
    /// Practicum API OAuth token
    pub practicum_token: String,
    /// Telegram Bot token
    pub telegram_token: String,
    /// 目标 chat ID
    pub telegram_chat_id: String,
    /// 作业状态 API 端点
    pub endpoint: String,
    /// 轮询间隔（秒）
    pub retry_secs: u64,
    /// HTTP 请求超时（秒）
    pub timeout_secs: u64,
}

impl Config {
    /// 从环境变量构建配置
    ///
    /// 必需：`PRACTICUM_TOKEN`、`TELEGRAM_TOKEN`、`TELEGRAM_CHAT_ID`。
    /// 可选：`PRACTICUM_ENDPOINT` 覆盖默认端点。
    pub fn from_env() -> Result<Self, String> {
        let mut missing = Vec::new();
        let practicum_token = require_var("PRACTICUM_TOKEN", &mut missing);
        let telegram_token = require_var("TELEGRAM_TOKEN", &mut missing);
        let telegram_chat_id = require_var("TELEGRAM_CHAT_ID", &mut missing);

        if !missing.is_empty() {
            return Err(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            ));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint: env::var("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            retry_secs: DEFAULT_RETRY_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }
}

fn require_var(name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        // 空字符串等同于缺失
        _ => {
            missing.push(name);
            String::new()
        }
    }
}
