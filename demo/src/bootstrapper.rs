//! 示例组合根：构造适配器并注册全部处理器

use crate::adapters::{
    EmailClient, FailurePlan, InMemoryPubSubClient, InMemoryUserStore, LoggingEmailClient,
};
use crate::domain::{
    ChangeEmailCommand, EmailChanged, EmailSet, KpiEvent, NotifySlack, SaveUserCommand,
};
use crate::handlers::{
    ChangeEmailHandler, EmailChangedHandler, EmailSetHandler, KpiHandler, NotifySlackHandler,
    SaveUserHandler,
};
use mediator_application::command::Command;
use mediator_application::context::AppContext;
use mediator_application::error::AppError;
use mediator_application::{Bootstrapper, MessageBusConfig};
use std::sync::Arc;

/// 适配器的失败注入
#[derive(Debug, Clone, Copy, Default)]
pub struct Failures {
    pub repository: FailurePlan,
    pub pubsub: FailurePlan,
}

pub struct DemoBootstrapper {
    pub store: InMemoryUserStore,
    pub pubsub: InMemoryPubSubClient,
    pub email: LoggingEmailClient,
    bootstrapper: Bootstrapper,
}

impl DemoBootstrapper {
    pub fn new(config: MessageBusConfig) -> Result<Self, AppError> {
        Self::with_failures(config, Failures::default())
    }

    pub fn with_failures(config: MessageBusConfig, failures: Failures) -> Result<Self, AppError> {
        let store = InMemoryUserStore::new();
        let pubsub = InMemoryPubSubClient::new();
        let email = LoggingEmailClient::new();
        let bootstrapper = Bootstrapper::with_config(config);

        {
            let store = store.clone();
            bootstrapper.register_command::<SaveUserCommand, _, _>(move || {
                Ok(SaveUserHandler::new(store.session(failures.repository)))
            })?;
        }
        {
            let store = store.clone();
            bootstrapper.register_command::<ChangeEmailCommand, _, _>(move || {
                Ok(ChangeEmailHandler::new(store.session(failures.repository)))
            })?;
        }
        {
            let pubsub = pubsub.clone();
            bootstrapper.register_event::<EmailSet, _, _>(move || {
                Ok(EmailSetHandler::new(pubsub.session(failures.pubsub)))
            })?;
        }
        {
            let pubsub = pubsub.clone();
            bootstrapper.register_event::<KpiEvent, _, _>(move || {
                Ok(KpiHandler::new(pubsub.session(failures.pubsub)))
            })?;
        }
        {
            let pubsub = pubsub.clone();
            bootstrapper.register_event::<NotifySlack, _, _>(move || {
                Ok(NotifySlackHandler::new(pubsub.session(failures.pubsub)))
            })?;
        }
        {
            let client: Arc<dyn EmailClient> = Arc::new(email.clone());
            bootstrapper.register_event::<EmailChanged, _, _>(move || {
                Ok(EmailChangedHandler::new(client.clone()))
            })?;
        }

        bootstrapper.ensure_commands(&[SaveUserCommand::NAME, ChangeEmailCommand::NAME])?;
        tracing::info!(
            commands = ?bootstrapper.registered_commands(),
            events = ?bootstrapper.registered_events(),
            "demo bootstrapper ready"
        );

        Ok(Self {
            store,
            pubsub,
            email,
            bootstrapper,
        })
    }

    pub fn bootstrapper(&self) -> &Bootstrapper {
        &self.bootstrapper
    }

    pub async fn handle_command<C: Command>(
        &self,
        ctx: &AppContext,
        cmd: C,
    ) -> Result<C::Output, AppError> {
        self.bootstrapper.handle_command(ctx, cmd).await
    }
}
