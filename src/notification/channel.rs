//! 消息出口 trait 定义

use anyhow::Result;

/// 把文本消息发往固定目的地的能力
pub trait MessageSink {
    /// 出口名称（用于日志）
    fn name(&self) -> &str;

    /// 发送一条文本消息
    fn send(&self, text: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}
