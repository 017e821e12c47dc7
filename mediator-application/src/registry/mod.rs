//! 命令与事件注册表
//!
//! 两者都以稳定名称为键、以 `TypeId` 校验类型，保证同一名称只绑定一种
//! Rust 类型。命令名称至多绑定一个处理器工厂，重复注册即报错；
//! 事件名称按注册顺序追加订阅方。注册与查找都可以跨线程并发进行。

mod command_registry;
mod event_registry;

pub use command_registry::{BoxedCommandHandler, CommandRegistry, ResolvedCommand};
pub use event_registry::{ErasedEventHandler, EventRegistry, Subscriber};
