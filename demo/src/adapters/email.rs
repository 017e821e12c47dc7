use async_trait::async_trait;
use mediator_application::error::AppError;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub from: String,
    pub to: String,
    pub title: String,
    pub message: String,
}

#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        from: &str,
        to: &str,
        title: &str,
        message: &str,
    ) -> Result<(), AppError>;
}

/// 只写日志的邮件客户端，同时保留发送记录
#[derive(Debug, Clone, Default)]
pub struct LoggingEmailClient {
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl LoggingEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailClient for LoggingEmailClient {
    async fn send_email(
        &self,
        from: &str,
        to: &str,
        title: &str,
        message: &str,
    ) -> Result<(), AppError> {
        tracing::info!(from, to, title, body = message, "sent email");
        self.sent.lock().await.push(SentEmail {
            from: from.to_string(),
            to: to.to_string(),
            title: title.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
