//! 轮询周期错误分类
//!
//! 每个变体对应一次轮询周期中可能出现的一类失败，`Display` 文本保持稳定，
//! 错误通道的去重直接以渲染后的文本为键。

use thiserror::Error;

/// 单次轮询周期内的失败
#[derive(Debug, Error)]
pub enum PollError {
    /// 传输层失败（DNS、连接、超时、响应体解码）
    #[error("request to the homework API failed: {0}")]
    Connection(#[from] reqwest::Error),

    /// API 返回非 200 状态码
    #[error("{url} is unavailable, HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    /// 响应顶层不是 JSON object
    #[error("API response is not a JSON object")]
    TypeNotMapping,

    /// 响应缺少 homeworks 键
    #[error("API response has no `homeworks` key")]
    MissingHomeworksKey,

    /// 响应缺少 current_date 键
    #[error("API response has no `current_date` key")]
    MissingCurrentDateKey,

    /// homeworks 不是数组
    #[error("`homeworks` value is not a list")]
    HomeworksNotSequence,

    /// current_date 不是整数
    #[error("`current_date` value is not an integer")]
    CurrentDateNotInteger,

    /// 单个作业条目缺少 status 字段
    #[error("homework item has no `status` field")]
    MissingStatusField,

    /// 单个作业条目缺少 homework_name 字段
    #[error("homework item has no `homework_name` field")]
    MissingNameField,

    /// status 不在已知的三个状态码之内
    #[error("undocumented homework status: {0}")]
    UndocumentedStatus(String),
}
