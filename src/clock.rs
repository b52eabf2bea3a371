//! 时钟抽象 - 可注入的取时和休眠
//!
//! 轮询循环不直接碰 `tokio::time`，测试可以模拟大量周期而不真实等待。

use std::time::Duration;

use chrono::Utc;

/// 取时 + 休眠的注入点
pub trait Clock {
    /// 当前 Unix 秒
    fn now_unix(&self) -> i64;

    /// 休眠指定时长
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// 真实系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
