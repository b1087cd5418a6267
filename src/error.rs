//! Huddle 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。

use std::io;
use thiserror::Error;

/// Huddle 错误类型
#[derive(Debug, Error)]
pub enum HuddleError {
    /// I/O 错误（文件读写、目录操作等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 网络传输错误（连接失败、超时等）
    #[error("HTTP error: {0}")]
    Http(String),

    /// 后端返回的业务错误（带 HTTP 状态码）
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 认证错误（未登录 / token 失效）
    #[error("Auth error: {0}")]
    Auth(String),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),

    /// 资源不存在
    #[error("Not found: {0}")]
    NotFound(String),

    /// 无效数据
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Huddle Result 类型别名
pub type Result<T> = std::result::Result<T, HuddleError>;

impl HuddleError {
    /// 创建 HTTP 错误
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// 创建 API 错误
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: msg.into(),
        }
    }

    /// 创建认证错误
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// 创建配置错误
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 创建 NotFound 错误
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// 创建 InvalidData 错误
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HuddleError::http("connection refused");
        assert_eq!(err.to_string(), "HTTP error: connection refused");

        let err = HuddleError::api(404, "row not found");
        assert_eq!(err.to_string(), "API error (404): row not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let huddle_err: HuddleError = io_err.into();
        assert!(matches!(huddle_err, HuddleError::Io(_)));
    }
}
