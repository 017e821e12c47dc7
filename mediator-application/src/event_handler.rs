use crate::{context::AppContext, error::AppError, transaction::Transaction};
use async_trait::async_trait;
use mediator_domain::domain_event::{DomainEvent, EventMetadata};

/// 事件订阅方，收到的是已还原的具体事件类型
#[async_trait]
pub trait EventHandler<E>: Transaction
where
    E: DomainEvent,
{
    async fn handle(&mut self, ctx: &AppContext, event: &E) -> Result<(), AppError>;

    /// 携带事件元数据的入口，需要事件ID或因果链时覆盖
    async fn handle_with_metadata(
        &mut self,
        ctx: &AppContext,
        event: &E,
        _metadata: &EventMetadata,
    ) -> Result<(), AppError> {
        self.handle(ctx, event).await
    }
}
