use crate::{context::AppContext, error::AppError};
use async_trait::async_trait;
use mediator_domain::domain_event::EventEnvelope;

/// 处理器的事务能力：提交、回滚与上报事件
///
/// 每个处理器实例只服务于一个工作单元，`commit` 与 `rollback`
/// 由框架二选一调用且至多一次；`handle` 内不得自行调用它们。
#[async_trait]
pub trait Transaction: Send {
    async fn commit(&mut self, ctx: &AppContext) -> Result<(), AppError>;

    async fn rollback(&mut self, ctx: &AppContext) -> Result<(), AppError>;

    /// 提交成功后由框架读取，按产生顺序排列
    fn events(&self) -> Vec<EventEnvelope> {
        Vec::new()
    }
}
