//! 用户模型

use super::str_field;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 用户资料的稳定输出记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 用户名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// 注册时间（Unix 秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    /// Karma 分数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub karma: Option<i64>,

    /// 个人简介
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,

    /// 提交过的条目 ID 列表
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<Vec<u64>>,
}

/// 把上游用户 JSON 格式化为 [`User`]
///
/// 纯函数，从不失败；声明之外的上游字段一律丢弃。
#[must_use]
pub fn format_user(raw: &Value) -> User {
    User {
        id: str_field(raw, "id"),
        created: raw.get("created").and_then(Value::as_i64),
        karma: raw.get("karma").and_then(Value::as_i64),
        about: str_field(raw, "about"),
        submitted: raw
            .get("submitted")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_u64).collect()),
    }
}
