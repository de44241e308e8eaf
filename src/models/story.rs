//! 故事模型

use super::comment::{format_comment_tree, CommentTreeNode};
use super::{kids_field, str_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 故事的稳定输出记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// 条目 ID
    pub id: u64,

    /// 标题
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// 外部链接（文本帖没有）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// 正文（链接帖没有）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// 作者
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,

    /// 分数，缺失时为 0
    pub score: u32,

    /// 发布时间（Unix 秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,

    /// 评论总数，缺失时为 0
    pub descendants: u32,

    /// 直接子评论的 ID 列表，缺失时为空
    pub kids: Vec<u64>,

    /// 条目类型，恒为 "story"
    #[serde(rename = "type")]
    pub item_type: String,
}

/// 把上游条目 JSON 格式化为 [`Story`]
///
/// 纯函数，从不失败；只输出声明过的字段，不透传上游的任意字段。
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_story(item: &Value) -> Story {
    Story {
        id: item.get("id").and_then(Value::as_u64).unwrap_or_default(),
        title: str_field(item, "title"),
        url: str_field(item, "url"),
        text: str_field(item, "text"),
        by: str_field(item, "by"),
        score: item.get("score").and_then(Value::as_u64).unwrap_or(0) as u32,
        time: item.get("time").and_then(Value::as_i64),
        descendants: item
            .get("descendants")
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32,
        kids: kids_field(item),
        item_type: "story".to_string(),
    }
}

/// 带完整嵌套评论树的故事（来自 Algolia 的服务端物化树）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryWithComments {
    /// 条目 ID
    pub id: u64,

    /// 标题
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// 外部链接
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// 分数，缺失时为 0
    pub points: u32,

    /// 作者
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,

    /// 发布时间（Unix 秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,

    /// 嵌套评论树
    pub children: Vec<CommentTreeNode>,
}

/// 把 Algolia 条目 JSON 格式化为 [`StoryWithComments`]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_story_with_comments(raw: &Value) -> StoryWithComments {
    StoryWithComments {
        id: raw.get("id").and_then(Value::as_u64).unwrap_or_default(),
        title: str_field(raw, "title"),
        url: str_field(raw, "url"),
        points: raw.get("points").and_then(Value::as_u64).unwrap_or(0) as u32,
        by: str_field(raw, "author"),
        time: raw.get("created_at_i").and_then(Value::as_i64),
        children: raw
            .get("children")
            .and_then(Value::as_array)
            .map(|children| children.iter().map(format_comment_tree).collect())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_story_defaults_missing_numeric_fields() {
        let raw = json!({
            "id": 8863,
            "title": "My YC app: Dropbox",
            "by": "dhouston",
            "time": 1_175_714_200,
            "type": "story"
        });

        let story = format_story(&raw);
        assert_eq!(story.id, 8863);
        assert_eq!(story.score, 0);
        assert_eq!(story.descendants, 0);
        assert!(story.kids.is_empty());
        assert_eq!(story.item_type, "story");
    }

    #[test]
    fn test_format_story_is_pure() {
        let raw = json!({
            "id": 1,
            "title": "Y Combinator",
            "url": "http://ycombinator.com",
            "by": "pg",
            "score": 57,
            "time": 1_160_418_111,
            "descendants": 15,
            "kids": [2, 3, 4]
        });

        let first = format_story(&raw);
        let second = format_story(&raw);
        assert_eq!(first, second);
        assert_eq!(first.kids, vec![2, 3, 4]);
        assert_eq!(first.score, 57);
    }

    #[test]
    fn test_format_story_omits_absent_optional_fields() {
        let raw = json!({ "id": 42 });
        let story = format_story(&raw);
        let serialized = serde_json::to_value(&story).unwrap();
        assert!(serialized.get("title").is_none());
        assert!(serialized.get("url").is_none());
        assert_eq!(serialized["score"], 0);
    }

    #[test]
    fn test_format_story_with_comments_maps_algolia_fields() {
        let raw = json!({
            "id": 100,
            "title": "Show HN",
            "points": 12,
            "author": "alice",
            "created_at_i": 1_700_000_000,
            "children": [
                { "id": 101, "author": "bob", "text": "nice", "parent_id": 100, "children": [] }
            ]
        });

        let story = format_story_with_comments(&raw);
        assert_eq!(story.points, 12);
        assert_eq!(story.by.as_deref(), Some("alice"));
        assert_eq!(story.children.len(), 1);
        assert_eq!(story.children[0].by, "bob");
    }
}
