//! Homework Bot - 轮询作业评审状态并推送 Telegram 通知

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod notification;
pub mod poller;
pub mod status;
pub mod validate;

pub use api::{HomeworkApi, PracticumClient};
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use error::PollError;
pub use notification::{DedupChannel, MessageSink, NotificationDeduplicator, TelegramChannel};
pub use poller::HomeworkBot;
pub use status::{parse_status, HomeworkItem, HomeworkStatus};
pub use validate::check_response;
