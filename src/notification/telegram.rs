//! Telegram 出口 - 通过 Bot API sendMessage 发送文本

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::notification::channel::MessageSink;

/// Telegram Bot API 基础 URL
const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// sendMessage 请求载荷
#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Bot API 响应外壳
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram 出口
#[derive(Debug, Clone)]
pub struct TelegramChannel {
    client: Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramChannel {
    /// 从配置创建出口
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to create HTTP client for Telegram")?;

        Ok(Self {
            client,
            base_url: TELEGRAM_API_URL.to_string(),
            token: config.telegram_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
        })
    }

    /// 覆盖 API 基础 URL（代理或本地 Bot API server）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl MessageSink for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let payload = SendMessagePayload {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .context("Telegram request failed")?;

        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .with_context(|| format!("Telegram returned unreadable body, HTTP {}", status))?;

        if !body.ok {
            return Err(anyhow!(
                "Telegram refused the message: {}",
                body.description.unwrap_or_else(|| format!("HTTP {}", status))
            ));
        }
        Ok(())
    }
}
