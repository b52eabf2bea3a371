//! 通知层 - 消息出口和去重
//!
//! 出口只有一种能力：把一段文本发到固定的目的地。发送内部的失败
//! 由调用方记日志吞掉，不会让轮询循环崩溃。

pub mod channel;
pub mod deduplicator;
pub mod telegram;

pub use channel::MessageSink;
pub use deduplicator::{DedupChannel, NotificationDeduplicator};
pub use telegram::TelegramChannel;
