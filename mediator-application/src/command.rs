use mediator_domain::error::DomainResult;

/// 应用层命令（Command）
///
/// 表达“意图”的写操作请求，只存在于一次分发过程中。
/// - 每个命令名称恰好对应一个处理器工厂；
/// - 校验在构造处理器之前执行，失败时不会触碰任何资源；
/// - 建议保持语义化的“动宾结构”命名，如 `ChangeEmail`、`CloseOrder`。
///
/// 关联常量：
/// - `NAME`：命令的稳定名称，用于日志、追踪与路由。避免依赖 `type_name::<T>()`。
pub trait Command: Send + Sync + 'static {
    /// 命令的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;

    /// 处理成功后返回给调用方的结果
    type Output: Send + 'static;

    /// 命令自身的校验谓词
    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }
}
