//! 数据模型模块
//!
//! 上游 JSON 在边界上按松散类型处理，由这里的纯格式化函数收敛为
//! 稳定的输出记录。信任边界就在格式化函数：缺失的可选字段填默认值，
//! 缺失的必填字段保持缺省（序列化时省略），由调用方在格式化之前
//! 判定 not-found，这里从不失败。

pub mod comment;
pub mod story;
pub mod user;

pub use comment::{format_comment, format_comment_tree, Comment, CommentTreeNode};
pub use story::{format_story, format_story_with_comments, Story, StoryWithComments};
pub use user::{format_user, User};

use serde_json::Value;

/// 提取字符串字段
pub(crate) fn str_field(item: &Value, field: &str) -> Option<String> {
    item.get(field).and_then(Value::as_str).map(str::to_string)
}

/// 提取 kids 数组，缺失时返回空序列
pub(crate) fn kids_field(item: &Value) -> Vec<u64> {
    item.get("kids")
        .and_then(Value::as_array)
        .map(|kids| kids.iter().filter_map(Value::as_u64).collect())
        .unwrap_or_default()
}
