use super::{DomainEvent, EventMetadata};
use chrono::Utc;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// 类型擦除后的事件载荷
trait ErasedEvent: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn event_name(&self) -> &'static str;
    fn type_name(&self) -> &'static str;
}

impl<E: DomainEvent> ErasedEvent for E {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn event_name(&self) -> &'static str {
        E::NAME
    }

    fn type_name(&self) -> &'static str {
        type_name::<E>()
    }
}

/// 事件信封，包含类型擦除的事件载荷与元数据
///
/// 克隆信封只增加载荷的引用计数，事件本身保持不可变。
#[derive(Clone)]
pub struct EventEnvelope {
    pub metadata: EventMetadata,
    payload: Arc<dyn ErasedEvent>,
}

impl EventEnvelope {
    /// 封装一个不属于任何实体的事件（例如由事件处理器直接上报）
    pub fn new<E: DomainEvent>(event: E) -> Self {
        Self::build(None, event)
    }

    /// 封装由实体记录的事件，元数据中携带实体标识
    pub fn from_source<E: DomainEvent>(source_id: impl Into<String>, event: E) -> Self {
        Self::build(Some(source_id.into()), event)
    }

    fn build<E: DomainEvent>(source_id: Option<String>, event: E) -> Self {
        let metadata = EventMetadata::builder()
            .event_id(Uuid::new_v4())
            .event_name(E::NAME.to_string())
            .maybe_source_id(source_id)
            .occurred_at(Utc::now())
            .build();

        Self {
            metadata,
            payload: Arc::new(event),
        }
    }

    /// 事件的稳定名称
    pub fn name(&self) -> &'static str {
        self.payload.event_name()
    }

    /// 载荷的 Rust 类型名（用于诊断）
    pub fn payload_type(&self) -> &'static str {
        self.payload.type_name()
    }

    pub fn payload_type_id(&self) -> TypeId {
        self.payload.as_any().type_id()
    }

    pub fn is<E: DomainEvent>(&self) -> bool {
        self.payload.as_any().is::<E>()
    }

    /// 还原为具体事件类型；类型不符时返回 `None`
    pub fn downcast_ref<E: DomainEvent>(&self) -> Option<&E> {
        self.payload.as_any().downcast_ref::<E>()
    }

    /// 补全关联ID与因果ID（已存在的值保持不变）
    pub fn caused_by(mut self, correlation_id: Option<&str>, causation_id: &str) -> Self {
        self.metadata.fill_causation(correlation_id, causation_id);
        self
    }
}

impl fmt::Debug for EventEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEnvelope")
            .field("metadata", &self.metadata)
            .field("payload", &self.payload)
            .finish()
    }
}
