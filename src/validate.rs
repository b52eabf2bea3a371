//! 响应校验 - 在信任任何字段之前检查原始 API 响应的形状
//!
//! 检查按固定顺序进行，多个问题同时存在时报告的错误种类是确定的。

use serde_json::Value;

use crate::error::PollError;

/// 校验原始响应，返回 (原始作业条目列表, 服务端游标)
///
/// 条目保持原始 JSON，字段级检查由状态翻译器负责。
pub fn check_response(response: &Value) -> Result<(Vec<Value>, i64), PollError> {
    let object = response.as_object().ok_or(PollError::TypeNotMapping)?;

    if !object.contains_key("homeworks") {
        return Err(PollError::MissingHomeworksKey);
    }
    if !object.contains_key("current_date") {
        return Err(PollError::MissingCurrentDateKey);
    }

    let homeworks = object["homeworks"]
        .as_array()
        .ok_or(PollError::HomeworksNotSequence)?;
    let current_date = object["current_date"]
        .as_i64()
        .ok_or(PollError::CurrentDateNotInteger)?;

    Ok((homeworks.clone(), current_date))
}
