//! 实体（Entity）基础抽象
//!
//! 实体拥有唯一标识，并以只追加的方式记录自身状态变更产生的待发布事件。
//! 框架仅在处理器提交成功后读取这些事件，读取不会清空列表：每次分发
//! 使用的实体实例只属于该次调用。
//!
use crate::domain_event::{DomainEvent, EventEnvelope};
use std::ops::Deref;
use std::slice::Iter;
use std::{fmt::Display, str::FromStr};

/// 具备唯一标识与待发布事件的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display + Send + Sync;

    /// 使用给定标识创建实体
    fn new(id: Self::Id) -> Self
    where
        Self: Sized;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 已记录、尚未被框架收集的事件
    fn pending_events(&self) -> &PendingEvents;

    fn pending_events_mut(&mut self) -> &mut PendingEvents;

    /// 记录一个事件（由实体自身的变更方法调用）
    fn record<E: DomainEvent>(&mut self, event: E)
    where
        Self: Sized,
    {
        let envelope = EventEnvelope::from_source(self.id().to_string(), event);
        self.pending_events_mut().push(envelope);
    }
}

/// 只追加的待发布事件列表，按记录顺序排列
#[derive(Clone, Debug, Default)]
pub struct PendingEvents {
    events: Vec<EventEnvelope>,
}

impl PendingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, envelope: EventEnvelope) {
        self.events.push(envelope);
    }

    /// 复制当前事件列表（列表本身保持不变）
    pub fn snapshot(&self) -> Vec<EventEnvelope> {
        self.events.clone()
    }

    /// 按顺序返回事件名称
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(EventEnvelope::name).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, EventEnvelope> {
        self.events.iter()
    }
}

impl<'a> IntoIterator for &'a PendingEvents {
    type Item = &'a EventEnvelope;
    type IntoIter = Iter<'a, EventEnvelope>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl Deref for PendingEvents {
    type Target = [EventEnvelope];

    fn deref(&self) -> &Self::Target {
        &self.events
    }
}
