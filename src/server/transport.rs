//! 传输模块
//!
//! 只提供 Stdio 传输；协议消息占用标准输出，日志必须走标准错误。

use crate::error::Result;
use crate::server::handler::HnMcpHandler;
use crate::server::HnMcpServer;
use rust_mcp_sdk::{
    error::McpSdkError,
    mcp_server::{server_runtime, McpServerOptions},
    McpServer, StdioTransport, ToMcpServerHandler, TransportOptions,
};
use std::sync::Arc;

/// 运行 Stdio 服务器
pub async fn run_stdio_server(server: &HnMcpServer) -> Result<()> {
    tracing::info!("启动 Stdio MCP 服务器...");

    let server_info = server.server_info();
    let handler = HnMcpHandler::new(Arc::new(server.clone()));

    // 创建 Stdio 传输
    let transport = StdioTransport::new(TransportOptions::default())
        .map_err(|e| crate::error::Error::Mcp(e.to_string()))?;

    // 创建 MCP 服务器
    let mcp_server: Arc<rust_mcp_sdk::mcp_server::ServerRuntime> =
        server_runtime::create_server(McpServerOptions {
            server_details: server_info,
            transport,
            handler: handler.to_mcp_server_handler(),
            task_store: None,
            client_task_store: None,
        });

    tracing::info!("Stdio MCP 服务器已启动，等待连接...");
    mcp_server
        .start()
        .await
        .map_err(|e: McpSdkError| crate::error::Error::Mcp(e.to_string()))?;

    Ok(())
}
