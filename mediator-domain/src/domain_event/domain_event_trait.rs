use std::fmt;

/// 领域事件载荷需要满足的通用能力边界
///
/// 事件是已发生事实的不可变描述，仅通过 `NAME` 被订阅方查找。
pub trait DomainEvent: Clone + fmt::Debug + Send + Sync + 'static {
    /// 事件的稳定名称（建议常量字符串，不随重构变化），用于订阅查找
    const NAME: &'static str;
}
