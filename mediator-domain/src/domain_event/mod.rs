//! 领域事件（Domain Event）与事件信封
//!
//! 定义事件载荷需要实现的最小接口（`DomainEvent`），以及将事件类型擦除后
//! 与元数据一起封装的 `EventEnvelope`。订阅方按事件的稳定名称查找，
//! 并在注册边界一次性还原为具体类型。

mod domain_event_trait;
mod event_envelope;
mod metadata;

pub use domain_event_trait::DomainEvent;
pub use event_envelope::EventEnvelope;
pub use metadata::EventMetadata;
