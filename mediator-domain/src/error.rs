//! 领域层统一错误定义
//!
//! 每个错误都映射到一个机器可读的 `ErrorStatus`，
//! 便于 HTTP/CLI 等前端将其转换为响应码；映射本身不在本 crate 内完成。
//!
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 错误分类（机器可读状态）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorStatus {
    BadRequest,
    NotFound,
    NotAllowed,
    Conflict,
    Internal,
}

impl ErrorStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::NotAllowed => "not_allowed",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 仓储/外部适配器 ---
    #[error("repository error: {reason}")]
    Repository { reason: String },

    // --- 领域规则/命令与状态 ---
    #[error("invalid command: {reason}")]
    InvalidCommand { reason: String },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
    #[error("not found: {reason}")]
    NotFound { reason: String },
    #[error("not allowed: {reason}")]
    NotAllowed { reason: String },
}

impl DomainError {
    pub fn invalid_command(reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    pub fn not_allowed(reason: impl Into<String>) -> Self {
        Self::NotAllowed {
            reason: reason.into(),
        }
    }

    pub fn repository(reason: impl Into<String>) -> Self {
        Self::Repository {
            reason: reason.into(),
        }
    }

    /// 错误对应的机器可读状态
    pub fn status(&self) -> ErrorStatus {
        match self {
            Self::InvalidCommand { .. } => ErrorStatus::BadRequest,
            Self::NotFound { .. } => ErrorStatus::NotFound,
            Self::NotAllowed { .. } => ErrorStatus::NotAllowed,
            Self::InvalidState { .. } => ErrorStatus::Conflict,
            Self::Repository { .. } => ErrorStatus::Internal,
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
