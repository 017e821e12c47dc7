use mediator_domain::error::{DomainError, ErrorStatus};

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation of {command} failed: {source}")]
    Validation {
        command: &'static str,
        source: DomainError,
    },

    #[error("infra: {0}")]
    Infra(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// 原始失败与回滚失败同时保留
    #[error("rollback failed with \"{rollback}\" after getting \"{source}\"")]
    RollbackFailed {
        source: Box<AppError>,
        rollback: Box<AppError>,
    },

    #[error("subscriber {subscriber} failed on event {event}: {source}")]
    Cascade {
        event: &'static str,
        subscriber: &'static str,
        source: Box<AppError>,
    },

    #[error("failed to construct handler {handler}: {source}")]
    HandlerConstruction {
        handler: &'static str,
        source: Box<AppError>,
    },

    #[error("cascade exceeded {limit} events")]
    CascadeLimitExceeded { limit: usize },

    #[error("cancelled")]
    Cancelled,

    #[error("handler not registered: command={0}")]
    HandlerNotRegistered(String),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("name {name} is already bound to {registered}, cannot bind {incoming}")]
    NameCollision {
        name: &'static str,
        registered: &'static str,
        incoming: &'static str,
    },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl AppError {
    pub fn infra(reason: impl Into<String>) -> Self {
        Self::Infra(reason.into())
    }

    /// 机器可读状态；包装类错误沿用被包装错误的状态
    pub fn status(&self) -> ErrorStatus {
        match self {
            Self::Domain(e) => e.status(),
            Self::Validation { .. } => ErrorStatus::BadRequest,
            Self::RollbackFailed { source, .. }
            | Self::Cascade { source, .. }
            | Self::HandlerConstruction { source, .. } => source.status(),
            Self::Infra(_)
            | Self::Other(_)
            | Self::CascadeLimitExceeded { .. }
            | Self::Cancelled
            | Self::HandlerNotRegistered(_)
            | Self::AlreadyRegisteredCommand { .. }
            | Self::NameCollision { .. }
            | Self::TypeMismatch { .. } => ErrorStatus::Internal,
        }
    }

    /// 面向人的错误描述
    pub fn message(&self) -> String {
        match self {
            Self::Domain(e) | Self::Validation { source: e, .. } => e.to_string(),
            Self::Cascade { source, .. }
            | Self::HandlerConstruction { source, .. } => source.message(),
            other => other.to_string(),
        }
    }

    /// 沿包装链找到最初的失败（回滚失败时为原始失败）
    pub fn root_cause(&self) -> &AppError {
        match self {
            Self::RollbackFailed { source, .. }
            | Self::Cascade { source, .. }
            | Self::HandlerConstruction { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_always_bad_request() {
        let err = AppError::Validation {
            command: "ChangeEmail",
            source: DomainError::invalid_command("user ID cannot be empty"),
        };
        assert_eq!(err.status(), ErrorStatus::BadRequest);
        assert_eq!(err.message(), "invalid command: user ID cannot be empty");
        assert!(err.to_string().contains("ChangeEmail"));
    }

    #[test]
    fn rollback_failure_keeps_both_causes() {
        let err = AppError::RollbackFailed {
            source: Box::new(DomainError::not_found("user 42").into()),
            rollback: Box::new(AppError::infra("connection reset")),
        };

        let text = err.to_string();
        assert!(text.contains("user 42"));
        assert!(text.contains("connection reset"));
        assert_eq!(err.status(), ErrorStatus::NotFound);
        assert!(matches!(
            err.root_cause(),
            AppError::Domain(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn wrappers_delegate_status_and_message() {
        let err = AppError::Cascade {
            event: "EmailChanged",
            subscriber: "SendEmail",
            source: Box::new(AppError::HandlerConstruction {
                handler: "SendEmail",
                source: Box::new(DomainError::not_allowed("mailbox closed").into()),
            }),
        };

        assert_eq!(err.status(), ErrorStatus::NotAllowed);
        assert_eq!(err.message(), "not allowed: mailbox closed");
        assert!(matches!(err.root_cause(), AppError::Domain(_)));
    }

    #[test]
    fn framework_faults_are_internal() {
        assert_eq!(AppError::Cancelled.status(), ErrorStatus::Internal);
        assert_eq!(
            AppError::CascadeLimitExceeded { limit: 3 }.status(),
            ErrorStatus::Internal
        );
        let other: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(other.status(), ErrorStatus::Internal);
        assert_eq!(other.message(), "boom");
    }
}
