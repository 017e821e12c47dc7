use crate::error::AppError;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// 业务语境：链路追踪、审计主体与操作因果
#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessContext {
    correlation_id: Option<String>,
    causation_id: Option<String>,
    actor_type: Option<String>,
    actor_id: Option<String>,
}

impl BusinessContext {
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn causation_id(&self) -> Option<&str> {
        self.causation_id.as_deref()
    }

    pub fn actor_type(&self) -> Option<&str> {
        self.actor_type.as_deref()
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }
}

/// 应用层上下文（Application Context）
///
/// 承载一次分发所需的横切信息，贯穿命令处理与整个事件级联：
/// - 业务语境（`BusinessContext`）：`correlation_id`、`causation_id`、执行者类型/ID；
/// - 幂等键（`idempotency_key`）：用于在基础设施层实现请求幂等；
/// - 取消令牌与截止时间：仅供处理器自行观察，中介者本身不会因此中断级联。
///
/// 典型用法：
/// ```rust
/// use mediator_application::context::{AppContext, BusinessContext};
///
/// let ctx = AppContext {
///     biz: BusinessContext::builder()
///         .correlation_id("cor-123".into())
///         .actor_type("user".into())
///         .actor_id("u-1".into())
///         .build(),
///     idempotency_key: Some("idem-xyz".into()),
///     ..Default::default()
/// };
/// assert_eq!(ctx.correlation_id(), Some("cor-123"));
/// assert!(ctx.check().is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    /// 业务语境（链路追踪、审计主体、操作因果）
    pub biz: BusinessContext,
    /// 幂等键（可选）：为空则由上层或基础设施决定是否参与幂等
    pub idempotency_key: Option<String>,
    pub cancellation: CancellationToken,
    pub deadline: Option<Instant>,
}

impl AppContext {
    pub fn new(biz: BusinessContext) -> Self {
        Self {
            biz,
            ..Default::default()
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.biz.correlation_id()
    }

    /// 已取消或已超过截止时间
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// 供处理器在长耗时步骤之间调用
    pub fn check(&self) -> Result<(), AppError> {
        if self.is_cancelled() {
            Err(AppError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_is_not_cancelled() {
        let ctx = AppContext::default();
        assert!(!ctx.is_cancelled());
        assert!(ctx.check().is_ok());
        assert!(ctx.correlation_id().is_none());
    }

    #[test]
    fn cancelled_token_is_observed() {
        let token = CancellationToken::new();
        let ctx = AppContext::default().with_cancellation(token.clone());
        token.cancel();

        assert!(ctx.is_cancelled());
        assert!(matches!(ctx.check(), Err(AppError::Cancelled)));
    }

    #[test]
    fn elapsed_deadline_is_observed() {
        let ctx = AppContext::default().with_deadline(Instant::now());
        assert!(ctx.is_cancelled());

        let ctx = AppContext::default().with_timeout(Duration::from_secs(60));
        assert!(!ctx.is_cancelled());
    }

    #[test]
    fn business_context_builder_fills_optional_fields() {
        let biz = BusinessContext::builder()
            .correlation_id("cor-1".into())
            .maybe_actor_id(None)
            .build();

        assert_eq!(biz.correlation_id(), Some("cor-1"));
        assert!(biz.causation_id().is_none());
        assert!(biz.actor_id().is_none());
    }
}
