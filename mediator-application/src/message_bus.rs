//! 进程内中介者（Message Bus）
//!
//! 一次分发的流程：
//! 1. 解析命令处理器工厂（未注册属于配置错误，直接 panic）；
//! 2. 校验命令，失败时不构造处理器；
//! 3. 在工作单元中执行处理器，提交成功后收集事件；
//! 4. 以 FIFO 队列广度优先地把事件交给订阅方，每个订阅方同样运行在
//!    独立的工作单元中，其上报的事件追加到队尾；
//! 5. 任一订阅方失败即中止级联并返回该错误，已提交的命令不做补偿。
//!
//! 整个分发在调用方的任务中顺序执行；不同分发之间只共享注册表。

use crate::{
    command::Command,
    command_bus::CommandBus,
    context::AppContext,
    error::AppError,
    registry::{CommandRegistry, EventRegistry, Subscriber},
    unit_of_work::{CommandUnitOfWork, EventUnitOfWork},
};
use async_trait::async_trait;
use mediator_domain::domain_event::EventEnvelope;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::Instrument;

pub const DEFAULT_MAX_CASCADE_EVENTS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBusConfig {
    /// 单次分发最多处理的事件数（含命令直接产生的事件）
    pub max_cascade_events: usize,
}

impl Default for MessageBusConfig {
    fn default() -> Self {
        Self {
            max_cascade_events: DEFAULT_MAX_CASCADE_EVENTS,
        }
    }
}

#[derive(Clone)]
pub struct MessageBus {
    commands: Arc<CommandRegistry>,
    events: Arc<EventRegistry>,
    config: MessageBusConfig,
}

impl MessageBus {
    pub fn new(
        commands: Arc<CommandRegistry>,
        events: Arc<EventRegistry>,
        config: MessageBusConfig,
    ) -> Self {
        Self {
            commands,
            events,
            config,
        }
    }

    pub fn config(&self) -> &MessageBusConfig {
        &self.config
    }

    async fn dispatch_command<C: Command>(
        &self,
        ctx: &AppContext,
        cmd: C,
    ) -> Result<C::Output, AppError> {
        let resolved = match self.commands.resolve::<C>() {
            Some(resolved) => resolved,
            None => panic!("command is not registered: {:?}", C::NAME),
        };

        cmd.validate().map_err(|source| AppError::Validation {
            command: C::NAME,
            source,
        })?;

        let handler = resolved.build()?;
        tracing::debug!(handler = resolved.handler(), "handler resolved");

        let committed = CommandUnitOfWork::new(resolved.handler(), handler)
            .run(ctx, cmd)
            .await?;

        let seeds: VecDeque<EventEnvelope> = committed
            .events
            .into_iter()
            .map(|envelope| envelope.caused_by(ctx.correlation_id(), C::NAME))
            .collect();
        tracing::debug!(events = seeds.len(), "command committed");

        self.drain(ctx, seeds).await?;
        Ok(committed.output)
    }

    /// 广度优先地排空事件队列
    async fn drain(
        &self,
        ctx: &AppContext,
        mut queue: VecDeque<EventEnvelope>,
    ) -> Result<(), AppError> {
        let limit = self.config.max_cascade_events;
        let mut drained = 0usize;

        while let Some(envelope) = queue.pop_front() {
            drained += 1;
            if drained > limit {
                tracing::warn!(limit, pending = queue.len() + 1, "cascade limit exceeded");
                return Err(AppError::CascadeLimitExceeded { limit });
            }

            let subscribers = self.events.resolve_all(envelope.name());
            if subscribers.is_empty() {
                tracing::debug!(event = envelope.name(), "no subscribers, event dropped");
                continue;
            }

            let causation = envelope.metadata.event_id().to_string();
            for subscriber in &subscribers {
                let produced = self
                    .deliver(ctx, subscriber, &envelope)
                    .await
                    .map_err(|source| {
                        tracing::warn!(
                            event = envelope.name(),
                            subscriber = subscriber.name(),
                            error = %source,
                            "cascade aborted"
                        );
                        AppError::Cascade {
                            event: envelope.name(),
                            subscriber: subscriber.name(),
                            source: Box::new(source),
                        }
                    })?;

                queue.extend(
                    produced
                        .into_iter()
                        .map(|next| next.caused_by(ctx.correlation_id(), &causation)),
                );
            }
        }

        tracing::debug!(drained, "cascade drained");
        Ok(())
    }

    async fn deliver(
        &self,
        ctx: &AppContext,
        subscriber: &Subscriber,
        envelope: &EventEnvelope,
    ) -> Result<Vec<EventEnvelope>, AppError> {
        let handler = subscriber.build()?;
        tracing::debug!(event = envelope.name(), subscriber = subscriber.name(), "delivering");
        EventUnitOfWork::new(subscriber.name(), handler)
            .run(ctx, envelope)
            .await
    }
}

#[async_trait]
impl CommandBus for MessageBus {
    async fn dispatch<C>(&self, ctx: &AppContext, cmd: C) -> Result<C::Output, AppError>
    where
        C: Command,
    {
        let span = tracing::info_span!(
            "dispatch",
            command = C::NAME,
            correlation_id = ctx.correlation_id().unwrap_or_default()
        );
        self.dispatch_command(ctx, cmd).instrument(span).await
    }
}
