//! 状态翻译 - 把作业条目的状态码映射为人类可读的通知文本

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PollError;

/// 作业评审状态（API 只定义了这三个状态码）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    /// 评审通过
    Approved,
    /// 评审中
    Reviewing,
    /// 评审退回
    Rejected,
}

impl HomeworkStatus {
    /// 解析状态码，未知状态码返回 None
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// 固定的评审结论文本
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Work has been reviewed: the reviewer liked everything. Hooray!",
            Self::Reviewing => "Work has been taken for review by the reviewer.",
            Self::Rejected => "Work has been reviewed: the reviewer has remarks.",
        }
    }
}

/// 一条作业条目的类型化快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkItem {
    pub name: String,
    pub status: HomeworkStatus,
}

impl HomeworkItem {
    /// 把原始 JSON 条目类型化
    ///
    /// 字段检查属于翻译器而不是响应校验器：校验器只保证外层形状，
    /// 条目的类型化在这里一次完成，下游不再重复检查。
    pub fn from_raw(item: &Value) -> Result<Self, PollError> {
        let status_code = item
            .get("status")
            .and_then(Value::as_str)
            .ok_or(PollError::MissingStatusField)?;
        let name = item
            .get("homework_name")
            .and_then(Value::as_str)
            .ok_or(PollError::MissingNameField)?;

        let status = HomeworkStatus::from_code(status_code)
            .ok_or_else(|| PollError::UndocumentedStatus(status_code.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            status,
        })
    }
}

/// 把原始条目翻译成 (作业名, 通知文本)
pub fn parse_status(item: &Value) -> Result<(String, String), PollError> {
    let item = HomeworkItem::from_raw(item)?;
    let message = format!(
        "Changed review status of \"{}\". {}",
        item.name,
        item.status.verdict()
    );
    Ok((item.name, message))
}
