//! 错误处理模块

use rust_mcp_sdk::schema::CallToolError;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum Error {
    /// 初始化错误
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 参数校验错误（包含所有违反约束的字段，不只是第一个）
    #[error("Validation error: {0}")]
    Validation(String),

    /// 资源不存在，或者存在但类型不符
    #[error("{resource} with ID {id} not found")]
    NotFound {
        /// 资源种类（Story、Comment、User）
        resource: String,
        /// 请求的标识符
        id: String,
    },

    /// 上游 API 调用失败（网络错误、非 2xx 状态码、响应体无法解析）
    #[error("{api} API error: {message}")]
    Api {
        /// 发起调用的上游客户端名称
        api: String,
        /// 底层错误信息
        message: String,
    },

    /// MCP 协议错误
    #[error("MCP protocol error: {0}")]
    Mcp(String),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL 解析错误
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Reqwest 错误
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// 其他错误
    #[error("Unknown error: {0}")]
    Other(String),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// 便捷构造：资源未找到
    #[must_use]
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        Error::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    /// 便捷构造：上游 API 错误
    #[must_use]
    pub fn api(api: &str, message: impl std::fmt::Display) -> Self {
        Error::Api {
            api: api.to_string(),
            message: message.to_string(),
        }
    }

    /// 转换为 MCP 工具调用错误
    ///
    /// 校验失败和资源未找到映射为 invalid-params（调用方的问题）；
    /// 其余映射为内部错误（上游或服务器的问题）。
    #[must_use]
    pub fn into_call_tool_error(self, tool: &str) -> CallToolError {
        match &self {
            Error::Validation(_) | Error::NotFound { .. } => {
                CallToolError::invalid_arguments(tool, Some(self.to_string()))
            }
            _ => CallToolError::from_message(self.to_string()),
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Error {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
