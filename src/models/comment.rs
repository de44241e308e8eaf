//! 评论模型

use super::{kids_field, str_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 评论的稳定输出记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// 条目 ID
    pub id: u64,

    /// 评论正文，缺失时为空字符串
    pub text: String,

    /// 作者，账号被删除时上游省略该字段，填 "deleted"
    pub by: String,

    /// 发布时间（Unix 秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,

    /// 父条目 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,

    /// 直接子评论的 ID 列表，缺失时为空
    pub kids: Vec<u64>,

    /// 条目类型，恒为 "comment"
    #[serde(rename = "type")]
    pub item_type: String,
}

/// 把上游条目 JSON 格式化为 [`Comment`]
///
/// 纯函数，从不失败。
#[must_use]
pub fn format_comment(item: &Value) -> Comment {
    Comment {
        id: item.get("id").and_then(Value::as_u64).unwrap_or_default(),
        text: str_field(item, "text").unwrap_or_default(),
        by: str_field(item, "by").unwrap_or_else(|| "deleted".to_string()),
        time: item.get("time").and_then(Value::as_i64),
        parent: item.get("parent").and_then(Value::as_u64),
        kids: kids_field(item),
        item_type: "comment".to_string(),
    }
}

/// 递归的评论树节点（来自 Algolia 的嵌套条目形状）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentTreeNode {
    /// 条目 ID
    pub id: u64,

    /// 评论正文，缺失时为空字符串
    pub text: String,

    /// 作者，缺失时为 "deleted"
    pub by: String,

    /// 发布时间（Unix 秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,

    /// 父条目 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,

    /// 嵌套子评论
    pub children: Vec<CommentTreeNode>,
}

/// 把 Algolia 嵌套条目递归格式化为 [`CommentTreeNode`]
///
/// 深度没有上限，实际受上游线程深度约束。
#[must_use]
pub fn format_comment_tree(raw: &Value) -> CommentTreeNode {
    CommentTreeNode {
        id: raw.get("id").and_then(Value::as_u64).unwrap_or_default(),
        text: str_field(raw, "text").unwrap_or_default(),
        by: str_field(raw, "author").unwrap_or_else(|| "deleted".to_string()),
        time: raw.get("created_at_i").and_then(Value::as_i64),
        parent: raw.get("parent_id").and_then(Value::as_u64),
        children: raw
            .get("children")
            .and_then(Value::as_array)
            .map(|children| children.iter().map(format_comment_tree).collect())
            .unwrap_or_default(),
    }
}
