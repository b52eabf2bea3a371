//! 通知去重器 - 抑制内容完全相同的重复通知
//!
//! 两个独立通道：状态通知和错误通知，各自只记住最后一次成功发出的内容。
//! 同一内容在下一次内容变化之前最多发出一次。

use tracing::debug;

/// 去重通道
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupChannel {
    /// 作业状态变化通知
    Status,
    /// 错误报告通知
    Error,
}

impl DedupChannel {
    fn label(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Error => "error",
        }
    }
}

/// 通知去重器
///
/// 调用方先 `should_send` 再发送，发送成功后立即 `record`，
/// 两者之间不能插入其他发送。
#[derive(Debug, Default)]
pub struct NotificationDeduplicator {
    last_status: Option<String>,
    last_error: Option<String>,
}

impl NotificationDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内容与通道当前记录不同（或通道从未记录过）时返回 true
    pub fn should_send(&self, channel: DedupChannel, content: &str) -> bool {
        let last = match channel {
            DedupChannel::Status => &self.last_status,
            DedupChannel::Error => &self.last_error,
        };
        let send = last.as_deref() != Some(content);
        if !send {
            debug!(
                channel = channel.label(),
                "notification suppressed, content unchanged"
            );
        }
        send
    }

    /// 无条件覆盖通道记录
    pub fn record(&mut self, channel: DedupChannel, content: &str) {
        let last = match channel {
            DedupChannel::Status => &mut self.last_status,
            DedupChannel::Error => &mut self.last_error,
        };
        *last = Some(content.to_string());
    }
}
