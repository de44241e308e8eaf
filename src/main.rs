//! Hacker News MCP 服务器主程序

use clap::{Parser, Subcommand};
use hn_mcp::HnMcpServer;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hn-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hacker News 查询 MCP 服务器", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件路径
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// 启用调试日志
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 启动 Stdio 服务器
    Serve,

    /// 生成配置文件
    Config {
        /// 输出文件路径
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,

        /// 覆盖已存在的文件
        #[arg(short, long)]
        force: bool,
    },

    /// 测试工具
    Test {
        /// 要测试的工具 [search, getStory, getStoryWithComments, getStories,
        /// getComment, getComments, getCommentTree, getUser, getUserSubmissions]
        #[arg(short, long, default_value = "getStory")]
        tool: String,

        /// 条目 ID（用于故事和评论类工具）
        #[arg(long)]
        id: Option<u64>,

        /// 搜索关键词（用于 search）
        #[arg(long)]
        query: Option<String>,

        /// 用户名（用于 getUser 和 getUserSubmissions）
        #[arg(long)]
        name: Option<String>,

        /// 列表类型（用于 getStories）[top, new, best, ask, show, job]
        #[arg(long, default_value = "top")]
        list_type: String,

        /// 结果数量上限
        #[arg(long)]
        limit: Option<u32>,
    },

    /// 显示版本信息
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 日志系统在 serve_command 中初始化，以便使用配置文件中的日志设置

    match cli.command {
        Commands::Serve => {
            serve_command(&cli.config, cli.debug).await?;
        }
        Commands::Config { output, force } => {
            config_command(&output, force)?;
        }
        Commands::Test {
            tool,
            id,
            query,
            name,
            list_type,
            limit,
        } => {
            test_command(
                &tool,
                id,
                query.as_deref(),
                name.as_deref(),
                &list_type,
                limit,
            )
            .await?;
        }
        Commands::Version => {
            version_command();
        }
    }

    Ok(())
}

/// 加载配置：有配置文件则读文件，否则用环境变量覆盖的默认值
fn load_config(config_path: &PathBuf) -> Result<hn_mcp::config::AppConfig, Box<dyn std::error::Error>> {
    let config = if config_path.exists() {
        hn_mcp::config::AppConfig::from_file(config_path)
            .map_err(|e| format!("加载配置文件失败: {e}"))?
    } else {
        hn_mcp::config::AppConfig::from_env().map_err(|e| format!("加载环境配置失败: {e}"))?
    };

    config.validate().map_err(|e| format!("配置验证失败: {e}"))?;
    Ok(config)
}

/// 启动服务器命令
async fn serve_command(config_path: &PathBuf, debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;

    // debug 模式覆盖配置文件中的日志级别
    if debug {
        let mut debug_config = config.logging.clone();
        debug_config.level = "debug".to_string();
        hn_mcp::init_logging_with_config(&debug_config)
            .map_err(|e| format!("初始化日志系统失败: {e}"))?;
    } else {
        hn_mcp::init_logging_with_config(&config.logging)
            .map_err(|e| format!("初始化日志系统失败: {e}"))?;
    }

    tracing::info!("启动 Hacker News MCP 服务器 v{}", env!("CARGO_PKG_VERSION"));

    let server = HnMcpServer::new(config).map_err(|e| format!("创建服务器失败: {e}"))?;

    // 收到中断信号时正常退出（退出码 0）
    tokio::select! {
        result = server.run_stdio() => {
            result.map_err(|e| format!("Stdio 服务器运行失败: {e}"))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("收到中断信号，正常退出");
        }
    }

    Ok(())
}

/// 生成配置文件命令
fn config_command(output: &PathBuf, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && !force {
        return Err(format!("配置文件已存在: {}，使用 --force 覆盖", output.display()).into());
    }

    let config = hn_mcp::config::AppConfig::default();
    config
        .save_to_file(output)
        .map_err(|e| format!("保存配置文件失败: {e}"))?;

    println!("配置文件已生成: {}", output.display());
    println!("请根据需要编辑配置文件。");

    Ok(())
}

/// 测试工具命令
async fn test_command(
    tool: &str,
    id: Option<u64>,
    query: Option<&str>,
    name: Option<&str>,
    list_type: &str,
    limit: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = hn_mcp::config::AppConfig::from_env()?;
    let service = std::sync::Arc::new(hn_mcp::api::HnService::new(&config.api, &config.cache)?);
    let registry = hn_mcp::tools::create_default_registry(&service);

    let arguments = match tool {
        "search" => {
            let query = query.ok_or("search 需要 --query 参数")?;
            let mut args = serde_json::json!({ "query": query });
            if let Some(limit) = limit {
                args["hitsPerPage"] = serde_json::json!(limit);
            }
            args
        }
        "getStory" | "getComment" | "getStoryWithComments" => {
            let id = id.ok_or_else(|| format!("{tool} 需要 --id 参数"))?;
            serde_json::json!({ "id": id })
        }
        "getComments" | "getCommentTree" => {
            let id = id.ok_or_else(|| format!("{tool} 需要 --id 参数"))?;
            let mut args = serde_json::json!({ "storyId": id });
            if let Some(limit) = limit {
                args["limit"] = serde_json::json!(limit);
            }
            args
        }
        "getStories" => {
            let mut args = serde_json::json!({ "type": list_type });
            if let Some(limit) = limit {
                args["limit"] = serde_json::json!(limit);
            }
            args
        }
        "getUser" | "getUserSubmissions" => {
            let name = name.ok_or_else(|| format!("{tool} 需要 --name 参数"))?;
            serde_json::json!({ "id": name })
        }
        other => {
            return Err(format!("未知的工具: {other}").into());
        }
    };

    println!("测试工具: {tool}");
    match registry.execute_tool(tool, arguments).await {
        Ok(result) => {
            println!("工具执行成功:");
            if let Some(content) = result.content.first() {
                match content {
                    rust_mcp_sdk::schema::ContentBlock::TextContent(text_content) => {
                        println!("{}", text_content.text);
                    }
                    other => {
                        println!("非文本内容: {other:?}");
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("工具执行失败: {e}");
        }
    }

    Ok(())
}

/// 版本命令
fn version_command() {
    println!("Hacker News MCP 服务器 v{}", env!("CARGO_PKG_VERSION"));
    println!("构建时间: {}", env!("BUILD_TIMESTAMP"));
    println!("Git 提交: {}", env!("GIT_COMMIT"));
    println!("Rust 版本: {}", env!("RUST_VERSION"));
}
