//! Practicum API 客户端
//!
//! 只负责一次带时间窗口的认证请求，重试策略在轮询循环里。

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::error::PollError;

/// 作业状态数据源
///
/// 轮询循环通过这个 trait 取数，测试里用脚本化的假实现替换网络。
pub trait HomeworkApi {
    /// 拉取 `from_date` 之后的状态快照
    fn fetch(
        &self,
        from_date: i64,
    ) -> impl std::future::Future<Output = Result<Value, PollError>> + Send;
}

/// 基于 reqwest 的真实客户端
#[derive(Debug, Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// 创建客户端，请求超时有上界，挂死的网络调用不会永久卡住循环
    pub fn new(config: &Config) -> Result<Self, PollError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.practicum_token.clone(),
        })
    }
}

impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, PollError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(PollError::HttpStatus {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        // 响应体不是合法 JSON 时 reqwest 的解码错误归入 Connection
        let body = response.json::<Value>().await?;
        Ok(body)
    }
}
