use super::{Counters, FailurePlan};
use crate::domain::KpiEvent;
use async_trait::async_trait;
use mediator_application::error::AppError;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 已发布到消息主题的通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    EmailChanged {
        user_id: String,
        new_email: String,
        old_email: String,
    },
    Kpi {
        action: String,
        data: String,
    },
    Slack {
        message: String,
    },
}

/// 发布端口；通知在 `commit` 之前只是暂存
#[async_trait]
pub trait PubSubClient: Send + Sync {
    async fn notify_email_changed(
        &mut self,
        user_id: &str,
        new_email: &str,
        old_email: &str,
    ) -> Result<(), AppError>;

    async fn notify_kpi_service(&mut self, event: &KpiEvent) -> Result<(), AppError>;

    async fn notify_slack(&mut self, message: &str) -> Result<(), AppError>;

    async fn commit(&mut self) -> Result<(), AppError>;

    async fn rollback(&mut self) -> Result<(), AppError>;
}

/// 共享的内存主题，记录已确认发布的通知
#[derive(Debug, Clone, Default)]
pub struct InMemoryPubSubClient {
    published: Arc<Mutex<Vec<Notification>>>,
    counters: Counters,
}

impl InMemoryPubSubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self, failures: FailurePlan) -> PubSubSession {
        PubSubSession {
            client: self.clone(),
            failures,
            staged: Vec::new(),
        }
    }

    pub async fn published(&self) -> Vec<Notification> {
        self.published.lock().await.clone()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }
}

pub struct PubSubSession {
    client: InMemoryPubSubClient,
    failures: FailurePlan,
    staged: Vec<Notification>,
}

#[async_trait]
impl PubSubClient for PubSubSession {
    async fn notify_email_changed(
        &mut self,
        user_id: &str,
        new_email: &str,
        old_email: &str,
    ) -> Result<(), AppError> {
        tracing::info!(user_id, old_email, new_email, "requested EmailChanged notification");
        self.staged.push(Notification::EmailChanged {
            user_id: user_id.to_string(),
            new_email: new_email.to_string(),
            old_email: old_email.to_string(),
        });
        Ok(())
    }

    async fn notify_kpi_service(&mut self, event: &KpiEvent) -> Result<(), AppError> {
        tracing::info!(action = %event.action, "requested KPI notification");
        self.staged.push(Notification::Kpi {
            action: event.action.clone(),
            data: event.data.clone(),
        });
        Ok(())
    }

    async fn notify_slack(&mut self, message: &str) -> Result<(), AppError> {
        tracing::info!(slack_message = message, "requested Slack message");
        self.staged.push(Notification::Slack {
            message: message.to_string(),
        });
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        self.client.counters.committed();
        if self.failures.commit {
            return Err(AppError::infra("pubsub commit failed"));
        }
        self.client
            .published
            .lock()
            .await
            .extend(self.staged.drain(..));
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), AppError> {
        self.client.counters.rolled_back();
        if self.failures.rollback {
            return Err(AppError::infra("pubsub rollback failed"));
        }
        self.staged.clear();
        Ok(())
    }
}
