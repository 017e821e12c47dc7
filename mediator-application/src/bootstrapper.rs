//! 组合根（Composition Root）
//!
//! 应用启动时构造一次，注册全部命令与事件处理器工厂，再把同一个实例的
//! 引用交给各个入口（worker、CLI 等）。不存在进程级的全局单例。

use crate::{
    command::Command,
    command_bus::CommandBus,
    command_handler::CommandHandler,
    context::AppContext,
    error::AppError,
    event_handler::EventHandler,
    message_bus::{MessageBus, MessageBusConfig},
    registry::{CommandRegistry, EventRegistry},
};
use mediator_domain::domain_event::DomainEvent;
use std::sync::Arc;

#[derive(Default)]
pub struct Bootstrapper {
    commands: Arc<CommandRegistry>,
    events: Arc<EventRegistry>,
    config: MessageBusConfig,
}

impl Bootstrapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MessageBusConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &MessageBusConfig {
        &self.config
    }

    /// 注册命令处理器工厂；每个命令只能注册一次
    pub fn register_command<C, H, F>(&self, factory: F) -> Result<&Self, AppError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
        F: Fn() -> Result<H, AppError> + Send + Sync + 'static,
    {
        self.commands.register::<C, H, F>(factory)?;
        tracing::debug!(
            command = C::NAME,
            handler = std::any::type_name::<H>(),
            "command registered"
        );
        Ok(self)
    }

    /// 追加事件订阅方
    pub fn register_event<E, H, F>(&self, factory: F) -> Result<&Self, AppError>
    where
        E: DomainEvent,
        H: EventHandler<E> + 'static,
        F: Fn() -> Result<H, AppError> + Send + Sync + 'static,
    {
        self.events.register::<E, H, F>(factory)?;
        tracing::debug!(
            event = E::NAME,
            handler = std::any::type_name::<H>(),
            "subscriber registered"
        );
        Ok(self)
    }

    /// 启动期检查：命令必须已注册
    pub fn ensure_command<C: Command>(&self) -> Result<(), AppError> {
        match self.commands.resolve::<C>() {
            Some(_) => Ok(()),
            None => Err(AppError::HandlerNotRegistered(C::NAME.to_string())),
        }
    }

    pub fn ensure_commands(&self, names: &[&str]) -> Result<(), AppError> {
        match names.iter().find(|name| !self.commands.contains(name)) {
            Some(missing) => Err(AppError::HandlerNotRegistered((*missing).to_string())),
            None => Ok(()),
        }
    }

    pub fn message_bus(&self) -> MessageBus {
        MessageBus::new(self.commands.clone(), self.events.clone(), self.config)
    }

    pub async fn handle_command<C: Command>(
        &self,
        ctx: &AppContext,
        cmd: C,
    ) -> Result<C::Output, AppError> {
        self.message_bus().dispatch(ctx, cmd).await
    }

    pub fn registered_commands(&self) -> Vec<&'static str> {
        self.commands.registered_commands()
    }

    pub fn registered_events(&self) -> Vec<&'static str> {
        self.events.registered_events()
    }
}
