use crate::adapters::{EmailClient, PubSubClient};
use crate::domain::{EmailChanged, EmailSet, KpiEvent, NotifySlack};
use async_trait::async_trait;
use mediator_application::context::AppContext;
use mediator_application::error::AppError;
use mediator_application::event_handler::EventHandler;
use mediator_application::transaction::Transaction;
use mediator_domain::domain_event::{DomainEvent, EventEnvelope};
use std::sync::Arc;

pub const NOREPLY_SENDER: &str = "noreply@example.com";
pub const EMAIL_CHANGED_TITLE: &str = "NewEmail Changed Notification";

/// 发布邮箱变更通知，并上报 KPI 与 Slack 事件
pub struct EmailSetHandler<P> {
    pubsub: P,
    events: Vec<EventEnvelope>,
}

impl<P: PubSubClient> EmailSetHandler<P> {
    pub fn new(pubsub: P) -> Self {
        Self {
            pubsub,
            events: Vec::new(),
        }
    }
}

#[async_trait]
impl<P: PubSubClient + 'static> Transaction for EmailSetHandler<P> {
    async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        self.pubsub.commit().await
    }

    async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        self.pubsub.rollback().await
    }

    fn events(&self) -> Vec<EventEnvelope> {
        self.events.clone()
    }
}

#[async_trait]
impl<P: PubSubClient + 'static> EventHandler<EmailSet> for EmailSetHandler<P> {
    async fn handle(&mut self, _ctx: &AppContext, event: &EmailSet) -> Result<(), AppError> {
        self.pubsub
            .notify_email_changed(&event.user_id, &event.new_email, &event.original_email)
            .await?;

        self.events.push(EventEnvelope::new(KpiEvent {
            action: EmailSet::NAME.to_string(),
            data: format!("{event:?}"),
        }));
        self.events.push(EventEnvelope::new(NotifySlack {
            message: format!(
                "user {} changed email from {} to {}",
                event.user_id, event.original_email, event.new_email
            ),
        }));
        Ok(())
    }
}

pub struct KpiHandler<P> {
    pubsub: P,
}

impl<P: PubSubClient> KpiHandler<P> {
    pub fn new(pubsub: P) -> Self {
        Self { pubsub }
    }
}

#[async_trait]
impl<P: PubSubClient + 'static> Transaction for KpiHandler<P> {
    async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        self.pubsub.commit().await
    }

    async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        self.pubsub.rollback().await
    }
}

#[async_trait]
impl<P: PubSubClient + 'static> EventHandler<KpiEvent> for KpiHandler<P> {
    async fn handle(&mut self, _ctx: &AppContext, event: &KpiEvent) -> Result<(), AppError> {
        self.pubsub.notify_kpi_service(event).await
    }
}

pub struct NotifySlackHandler<P> {
    pubsub: P,
}

impl<P: PubSubClient> NotifySlackHandler<P> {
    pub fn new(pubsub: P) -> Self {
        Self { pubsub }
    }
}

#[async_trait]
impl<P: PubSubClient + 'static> Transaction for NotifySlackHandler<P> {
    async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        self.pubsub.commit().await
    }

    async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        self.pubsub.rollback().await
    }
}

#[async_trait]
impl<P: PubSubClient + 'static> EventHandler<NotifySlack> for NotifySlackHandler<P> {
    async fn handle(&mut self, _ctx: &AppContext, event: &NotifySlack) -> Result<(), AppError> {
        self.pubsub.notify_slack(&event.message).await
    }
}

/// 向旧邮箱发送变更提醒；邮件发送不参与事务
pub struct EmailChangedHandler {
    email: Arc<dyn EmailClient>,
}

impl EmailChangedHandler {
    pub fn new(email: Arc<dyn EmailClient>) -> Self {
        Self { email }
    }
}

#[async_trait]
impl Transaction for EmailChangedHandler {
    async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        Ok(())
    }

    async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl EventHandler<EmailChanged> for EmailChangedHandler {
    async fn handle(&mut self, _ctx: &AppContext, event: &EmailChanged) -> Result<(), AppError> {
        let message = format!("Your email was changed to {}", event.new_email);
        self.email
            .send_email(
                NOREPLY_SENDER,
                &event.original_email,
                EMAIL_CHANGED_TITLE,
                &message,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FailurePlan, InMemoryPubSubClient, Notification};

    #[tokio::test]
    async fn email_set_publishes_and_reports_follow_ups() {
        let client = InMemoryPubSubClient::new();
        let mut handler = EmailSetHandler::new(client.session(FailurePlan::default()));
        let ctx = AppContext::default();

        let event = EmailSet {
            user_id: "1".into(),
            original_email: "kamel@y".into(),
            new_email: "eli@x".into(),
        };
        handler.handle(&ctx, &event).await.unwrap();
        handler.commit(&ctx).await.unwrap();

        let names: Vec<_> = handler.events().iter().map(EventEnvelope::name).collect();
        assert_eq!(names, vec![KpiEvent::NAME, NotifySlack::NAME]);
        assert_eq!(
            client.published().await,
            vec![Notification::EmailChanged {
                user_id: "1".into(),
                new_email: "eli@x".into(),
                old_email: "kamel@y".into(),
            }]
        );
    }
}
