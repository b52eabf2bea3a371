//! 轮询循环 - fetch → validate → translate → notify → sleep
//!
//! 严格单线程顺序执行。任何一步失败都把整个周期转入错误上报，
//! 报告一次（按错误文本去重）后照常休眠重试，循环自身永不退出。

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::api::HomeworkApi;
use crate::clock::Clock;
use crate::error::PollError;
use crate::notification::{DedupChannel, MessageSink, NotificationDeduplicator};
use crate::status::parse_status;
use crate::validate::check_response;

/// 轮询机器人
///
/// 游标和两条去重记录都由它独占，没有并发访问。
pub struct HomeworkBot<A, S, C> {
    api: A,
    sink: S,
    clock: C,
    dedup: NotificationDeduplicator,
    cursor: i64,
    retry_interval: Duration,
}

impl<A, S, C> HomeworkBot<A, S, C>
where
    A: HomeworkApi,
    S: MessageSink,
    C: Clock,
{
    /// 创建机器人，游标从当前时刻起算
    pub fn new(api: A, sink: S, clock: C, retry_interval: Duration) -> Self {
        let cursor = clock.now_unix();
        Self {
            api,
            sink,
            clock,
            dedup: NotificationDeduplicator::new(),
            cursor,
            retry_interval,
        }
    }

    /// 当前游标（下一次拉取窗口的下界）
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// 永久运行：每个周期之后固定休眠一次
    pub async fn run(&mut self) {
        info!(
            interval_secs = self.retry_interval.as_secs(),
            cursor = self.cursor,
            "poll loop started"
        );
        loop {
            self.poll_once().await;
            self.clock.sleep(self.retry_interval).await;
        }
    }

    /// 执行一个完整周期（不含休眠）
    ///
    /// 周期内的失败在这里消化掉，调用方看不到错误。
    pub async fn poll_once(&mut self) {
        if let Err(e) = self.run_cycle().await {
            self.report_failure(e).await;
        }
    }

    /// 正常路径：拉取、校验、翻译、通知、推进游标
    async fn run_cycle(&mut self) -> Result<(), PollError> {
        debug!(cursor = self.cursor, "fetching homework statuses");
        let raw = self.api.fetch(self.cursor).await?;
        let (homeworks, current_date) = check_response(&raw)?;

        if homeworks.is_empty() {
            debug!("no new homework statuses");
        }

        // 先整体翻译：一个坏条目作废整个周期，任何消息都不会发出
        let messages = homeworks
            .iter()
            .map(parse_status)
            .collect::<Result<Vec<_>, _>>()?;

        for (name, message) in &messages {
            self.notify(DedupChannel::Status, message).await;
            debug!(homework = %name, "status processed");
        }

        // 游标只从服务端确认的 current_date 推进
        self.cursor = current_date;
        Ok(())
    }

    /// 错误路径：记日志，按错误文本去重后上报到同一个聊天
    async fn report_failure(&mut self, e: PollError) {
        error!(error = %e, "poll cycle failed");
        let message = format!("Bot failure: {}", e);
        self.notify(DedupChannel::Error, &message).await;
    }

    /// 去重检查 + 发送 + 成功后记录
    ///
    /// 发送失败只记日志，记录不更新，内容在下个周期还有机会发出。
    async fn notify(&mut self, channel: DedupChannel, message: &str) {
        if !self.dedup.should_send(channel, message) {
            return;
        }
        match self.sink.send(message).await {
            Ok(()) => {
                self.dedup.record(channel, message);
                info!(sink = self.sink.name(), "notification delivered");
            }
            Err(e) => {
                warn!(sink = self.sink.name(), error = %e, "failed to send notification");
            }
        }
    }
}
