//! 领域模型错误定义
//!
//! 定义了领域层所有可能的错误类型，提供清晰的错误上下文。

use thiserror::Error;

/// 领域模型错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 长帖中没有任何条目
    #[error("长帖不能为空")]
    EmptyThread,

    /// 持久化形式无法解析
    #[error("{what} 编码无效: {message}")]
    InvalidEncoding { what: String, message: String },

    /// 参数错误
    #[error("参数无效: {field}: {message}")]
    InvalidArgument { field: String, message: String },
}

impl DomainError {
    /// 创建编码错误
    pub fn invalid_encoding(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            what: what.into(),
            message: message.into(),
        }
    }

    /// 创建参数错误
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 仓储错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

/// 领域模型结果类型
pub type DomainResult<T> = Result<T, DomainError>;
