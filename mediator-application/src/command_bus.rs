use crate::{command::Command, context::AppContext, error::AppError};
use async_trait::async_trait;

/// 命令总线（Command Bus）
///
/// - 负责根据命令的具体类型路由到唯一的处理器，并驱动随后的事件级联；
/// - 框架可提供不同实现（如进程内、消息队列等）；
/// - 该 trait 带有泛型方法，通常以具体实现类型注入使用。
#[async_trait]
pub trait CommandBus: Send + Sync {
    /// 分发命令到对应处理器
    ///
    /// - `ctx`：应用上下文（链路追踪、幂等键、取消令牌等）
    /// - `cmd`：具体命令实例
    async fn dispatch<C>(&self, ctx: &AppContext, cmd: C) -> Result<C::Output, AppError>
    where
        C: Command;
}
