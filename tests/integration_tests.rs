//! 集成测试

use hn_mcp::{
    api::HnService,
    cache::{memory::MemoryCache, Cache},
    config::AppConfig,
    server::HnMcpServer,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 本地 HTTP 桩服务，按固定路由返回 JSON 并记录收到的请求路径
struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// 启动桩服务；路由是 (路径, 状态码, 响应体)，未命中的路径返回 404
    async fn spawn(routes: Vec<(&str, u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("绑定本地端口失败");
        let addr = listener.local_addr().expect("获取监听地址失败");

        let routes: HashMap<String, (u16, String)> = routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body.to_string())))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let Ok(n) = stream.read(&mut buf).await else {
                        return;
                    };
                    let request = String::from_utf8_lossy(&buf[..n]).to_string();
                    let path = request
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_string();
                    log.lock().unwrap().push(path.clone());

                    let (status, body) = routes
                        .get(&path)
                        .cloned()
                        .unwrap_or((404, "null".to_string()));
                    let reason = if status == 200 { "OK" } else { "Error" };
                    let response = format!(
                        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// 创建指向桩服务的查询服务
    fn service(&self) -> Arc<HnService> {
        let mut config = AppConfig::default();
        config.api.hn_base_url = self.base_url.clone();
        config.api.algolia_base_url = self.base_url.clone();
        Arc::new(HnService::new(&config.api, &config.cache).expect("创建服务失败"))
    }

    /// 到目前为止收到的请求路径
    fn seen_paths(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// 测试缓存功能
#[tokio::test]
async fn test_cache_functionality() {
    let cache = MemoryCache::new(Duration::from_secs(3600));

    // 基本读写
    cache
        .set("test_key".to_string(), "test_value".to_string())
        .await;
    assert_eq!(cache.get("test_key").await, Some("test_value".to_string()));

    // 删除
    cache.delete("test_key").await;
    assert_eq!(cache.get("test_key").await, None);

    // 清空
    cache.set("key1".to_string(), "value1".to_string()).await;
    cache.set("key2".to_string(), "value2".to_string()).await;
    cache.clear().await;
    assert_eq!(cache.get("key1").await, None);
    assert_eq!(cache.get("key2").await, None);
}

/// 测试缓存按实例 TTL 过期
#[tokio::test]
async fn test_cache_instance_ttl_expiry() {
    let cache = MemoryCache::new(Duration::from_millis(50));

    cache
        .set("expiring_key".to_string(), "expiring_value".to_string())
        .await;
    assert_eq!(
        cache.get("expiring_key").await,
        Some("expiring_value".to_string())
    );

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(cache.get("expiring_key").await, None);
}

/// 测试配置加载
#[test]
fn test_config_loading() {
    // 默认配置
    let config = AppConfig::default();
    assert_eq!(config.api.hn_base_url, "https://hacker-news.firebaseio.com/v0");
    assert_eq!(config.api.algolia_base_url, "https://hn.algolia.com/api/v1");
    assert_eq!(config.cache.item_ttl_secs, 300);
    assert_eq!(config.cache.search_ttl_secs, 60);
    assert!(config.validate().is_ok());

    // 环境变量覆盖
    std::env::set_var("HN_MCP_ITEM_TTL_SECS", "120");
    std::env::set_var("HN_MCP_LOG_LEVEL", "debug");

    let env_config = AppConfig::from_env().expect("环境配置加载失败");
    assert_eq!(env_config.cache.item_ttl_secs, 120);
    assert_eq!(env_config.logging.level, "debug");

    std::env::remove_var("HN_MCP_ITEM_TTL_SECS");
    std::env::remove_var("HN_MCP_LOG_LEVEL");
}

/// 测试配置文件读写往返
#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let path = dir.path().join("config.toml");

    let config = AppConfig::default();
    config.save_to_file(&path).expect("保存配置失败");

    let loaded = AppConfig::from_file(&path).expect("加载配置失败");
    assert_eq!(loaded.api.hn_base_url, config.api.hn_base_url);
    assert_eq!(loaded.cache.item_ttl_secs, config.cache.item_ttl_secs);
    assert_eq!(loaded.logging.level, config.logging.level);
}

/// 测试无效配置被拒绝
#[test]
fn test_config_validation_rejects_bad_values() {
    let mut config = AppConfig::default();
    config.api.hn_base_url = "not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.cache.item_ttl_secs = 0;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.logging.level = "noisy".to_string();
    assert!(config.validate().is_err());
}

/// 测试工具注册表提供全部九个工具
#[test]
fn test_tool_registry_lists_all_tools() {
    let config = AppConfig::default();
    let service = Arc::new(HnService::new(&config.api, &config.cache).expect("创建服务失败"));
    let registry = hn_mcp::tools::create_default_registry(&service);

    let names: Vec<String> = registry
        .get_tools()
        .into_iter()
        .map(|tool| tool.name)
        .collect();

    for expected in [
        "search",
        "getStory",
        "getStoryWithComments",
        "getStories",
        "getComment",
        "getComments",
        "getCommentTree",
        "getUser",
        "getUserSubmissions",
    ] {
        assert!(names.contains(&expected.to_string()), "缺少工具: {expected}");
    }
    assert_eq!(names.len(), 9);
}

/// 测试未知工具名返回错误而不是崩溃
#[tokio::test]
async fn test_unknown_tool_name() {
    let config = AppConfig::default();
    let service = Arc::new(HnService::new(&config.api, &config.cache).expect("创建服务失败"));
    let registry = hn_mcp::tools::create_default_registry(&service);

    let result = registry
        .execute_tool("doesNotExist", serde_json::json!({}))
        .await;
    assert!(result.is_err());
}

/// 测试参数校验发生在任何网络调用之前
#[tokio::test]
async fn test_validation_runs_before_network() {
    let config = AppConfig::default();
    let service = Arc::new(HnService::new(&config.api, &config.cache).expect("创建服务失败"));
    let registry = hn_mcp::tools::create_default_registry(&service);

    // 无效 ID 直接被校验层拒绝，不触发 HTTP 请求
    let result = registry
        .execute_tool("getStory", serde_json::json!({ "id": -1 }))
        .await;
    assert!(result.is_err());

    // 多个违规同时出现在错误信息里
    let result = registry
        .execute_tool("getComments", serde_json::json!({ "limit": 500 }))
        .await;
    let message = format!("{:?}", result.unwrap_err());
    assert!(message.contains("storyId"));
    assert!(message.contains("limit"));
}

/// 测试并发取数容忍单个分支失败
#[tokio::test]
async fn test_fan_out_tolerates_failed_branch() {
    let stub = StubServer::spawn(vec![
        ("/item/1.json", 200, r#"{"id":1,"title":"a","type":"story"}"#),
        ("/item/2.json", 500, r#"{"error":"boom"}"#),
        ("/item/3.json", 200, r#"{"id":3,"title":"c","type":"story"}"#),
    ])
    .await;
    let service = stub.service();

    let items = service.hn().get_items(&[1, 2, 3]).await;
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_ref().and_then(|v| v.get("id")).and_then(|v| v.as_u64()), Some(1));
    // 失败的分支只影响自己的位置
    assert!(items[1].is_none());
    assert_eq!(items[2].as_ref().and_then(|v| v.get("id")).and_then(|v| v.as_u64()), Some(3));
}

/// 测试 getComments 只抓取前 limit 个子评论
#[tokio::test]
async fn test_get_comments_fetches_only_first_limit_kids() {
    let stub = StubServer::spawn(vec![
        (
            "/item/10.json",
            200,
            r#"{"id":10,"title":"s","type":"story","kids":[1,2,3]}"#,
        ),
        (
            "/item/1.json",
            200,
            r#"{"id":1,"text":"first","by":"alice","parent":10,"type":"comment"}"#,
        ),
        (
            "/item/2.json",
            200,
            r#"{"id":2,"text":"second","by":"bob","parent":10,"type":"comment"}"#,
        ),
    ])
    .await;
    let service = stub.service();
    let registry = hn_mcp::tools::create_default_registry(&service);

    let result = registry
        .execute_tool(
            "getComments",
            serde_json::json!({ "storyId": 10, "limit": 2 }),
        )
        .await
        .expect("getComments 执行失败");

    let text = match result.content.first() {
        Some(rust_mcp_sdk::schema::ContentBlock::TextContent(text_content)) => {
            text_content.text.clone()
        }
        other => panic!("期望文本内容，得到 {other:?}"),
    };
    let comments: serde_json::Value = serde_json::from_str(&text).expect("响应不是合法 JSON");
    assert_eq!(comments.as_array().map(Vec::len), Some(2));

    // 第三个子评论根本不会被请求
    let paths = stub.seen_paths();
    assert!(paths.contains(&"/item/1.json".to_string()));
    assert!(paths.contains(&"/item/2.json".to_string()));
    assert!(!paths.contains(&"/item/3.json".to_string()));
}

/// 测试 getStory 对评论类型条目返回未找到而不是错配的故事
#[tokio::test]
async fn test_get_story_rejects_comment_typed_item() {
    let stub = StubServer::spawn(vec![(
        "/item/42.json",
        200,
        r#"{"id":42,"text":"a reply","by":"alice","parent":41,"type":"comment"}"#,
    )])
    .await;
    let service = stub.service();
    let registry = hn_mcp::tools::create_default_registry(&service);

    let result = registry
        .execute_tool("getStory", serde_json::json!({ "id": 42 }))
        .await;
    let message = format!("{:?}", result.unwrap_err());
    assert!(message.contains("not found"), "意外的错误: {message}");
}

/// 测试服务器创建与服务器信息
#[test]
fn test_server_creation() {
    let config = AppConfig::default();
    let server = HnMcpServer::new(config).expect("服务器创建失败");

    let server_info = server.server_info();
    assert_eq!(server_info.server_info.name, "hn-mcp");
    assert_eq!(server_info.server_info.version, hn_mcp::VERSION);
    assert!(server_info.capabilities.tools.is_some(), "服务器应该提供工具能力");
}
