//! 工作单元（Unit of Work）
//!
//! 包裹一次处理器调用：处理成功则提交，失败则回滚，二者恰好发生一次。
//! 回滚本身失败时返回同时携带两个错误的 `RollbackFailed`。
//! 只有提交成功后才读取处理器上报的事件。

use crate::{
    command::Command,
    context::AppContext,
    error::AppError,
    registry::{BoxedCommandHandler, ErasedEventHandler},
    transaction::Transaction,
};
use mediator_domain::domain_event::EventEnvelope;

/// 已提交的工作单元结果
#[derive(Debug)]
pub struct Committed<T> {
    pub output: T,
    pub events: Vec<EventEnvelope>,
}

pub struct CommandUnitOfWork<C: Command> {
    handler_name: &'static str,
    handler: BoxedCommandHandler<C>,
}

impl<C: Command> CommandUnitOfWork<C> {
    pub fn new(handler_name: &'static str, handler: BoxedCommandHandler<C>) -> Self {
        Self {
            handler_name,
            handler,
        }
    }

    pub async fn run(mut self, ctx: &AppContext, cmd: C) -> Result<Committed<C::Output>, AppError> {
        let outcome = self.handler.handle(ctx, cmd).await;
        let output = settle(self.handler.as_mut(), self.handler_name, ctx, outcome).await?;

        Ok(Committed {
            output,
            events: self.handler.events(),
        })
    }
}

pub struct EventUnitOfWork {
    subscriber: &'static str,
    handler: Box<dyn ErasedEventHandler>,
}

impl EventUnitOfWork {
    pub fn new(subscriber: &'static str, handler: Box<dyn ErasedEventHandler>) -> Self {
        Self {
            subscriber,
            handler,
        }
    }

    /// 返回订阅方提交后上报的事件
    pub async fn run(
        mut self,
        ctx: &AppContext,
        envelope: &EventEnvelope,
    ) -> Result<Vec<EventEnvelope>, AppError> {
        let outcome = self.handler.handle_envelope(ctx, envelope).await;
        settle(self.handler.as_mut(), self.subscriber, ctx, outcome).await?;

        Ok(self.handler.events())
    }
}

async fn settle<T, H>(
    handler: &mut H,
    name: &'static str,
    ctx: &AppContext,
    outcome: Result<T, AppError>,
) -> Result<T, AppError>
where
    H: Transaction + ?Sized,
{
    match outcome {
        Ok(output) => {
            if let Err(err) = handler.commit(ctx).await {
                tracing::warn!(handler = name, error = %err, "commit failed");
                return Err(err);
            }
            tracing::debug!(handler = name, "committed");
            Ok(output)
        }
        Err(err) => match handler.rollback(ctx).await {
            Ok(()) => {
                tracing::debug!(handler = name, error = %err, "rolled back");
                Err(err)
            }
            Err(rollback) => {
                tracing::warn!(
                    handler = name,
                    error = %err,
                    rollback = %rollback,
                    "rollback failed"
                );
                Err(AppError::RollbackFailed {
                    source: Box::new(err),
                    rollback: Box::new(rollback),
                })
            }
        },
    }
}
