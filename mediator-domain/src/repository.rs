//! 仓储适配器（Repository）协议
//!
//! 中介者只依赖该接口：查找、保存、提交、回滚，以及暴露已保存的实体，
//! 以便处理器在提交成功后收集实体记录的事件。具体实现（SQL、内存等）
//! 由基础设施层提供；同一仓储实例只服务于一次处理器调用。
//!
use crate::domain_event::EventEnvelope;
use crate::entity::Entity;
use crate::error::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Entity,
{
    /// 按标识查找实体；不存在时返回 `DomainError::NotFound`
    async fn find(&self, id: &E::Id) -> DomainResult<E>;

    /// 暂存实体的变更，直到 `commit`
    async fn save(&mut self, entity: E) -> DomainResult<()>;

    async fn commit(&mut self) -> DomainResult<()>;

    async fn rollback(&mut self) -> DomainResult<()>;

    /// 本次会话中已保存的实体（按保存顺序）
    fn saved_entities(&self) -> &[E];

    /// 已保存实体记录的全部事件
    fn saved_events(&self) -> Vec<EventEnvelope> {
        harvest_events(self.saved_entities())
    }
}

/// 按实体顺序收集待发布事件（不会清空实体的事件列表）
pub fn harvest_events<'a, E, I>(entities: I) -> Vec<EventEnvelope>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    entities
        .into_iter()
        .flat_map(|entity| entity.pending_events().iter().cloned())
        .collect()
}
