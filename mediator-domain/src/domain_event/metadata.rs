use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 事件元数据
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    event_id: Uuid,
    event_name: String,
    /// 产生事件的实体标识（由处理器直接上报的事件为空）
    source_id: Option<String>,
    occurred_at: DateTime<Utc>,
    /// 关联ID：同一次分发产生的所有事件共享
    correlation_id: Option<String>,
    /// 因果ID：触发该事件的命令名或上游事件ID
    causation_id: Option<String>,
}

impl EventMetadata {
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    pub fn occurred_at(&self) -> &DateTime<Utc> {
        &self.occurred_at
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn causation_id(&self) -> Option<&str> {
        self.causation_id.as_deref()
    }

    pub(crate) fn fill_causation(&mut self, correlation_id: Option<&str>, causation_id: &str) {
        if self.correlation_id.is_none() {
            self.correlation_id = correlation_id.map(str::to_string);
        }
        if self.causation_id.is_none() {
            self.causation_id = Some(causation_id.to_string());
        }
    }
}
