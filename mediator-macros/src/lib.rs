//! 中介者领域契约的过程宏
//!
//! - `#[entity]`：追加 `id` 与待发布事件字段，实现 `Entity`；
//! - `#[entity_id]`：为单字段 tuple struct 生成标识类型所需的转换与显示；
//! - `#[domain_event]`：派生常用 trait 并实现 `DomainEvent`（稳定名称）。
//!
use proc_macro::TokenStream;

mod derive_utils;
mod domain_event;
mod entity;
mod entity_id;
mod field_utils;
mod options;

/// 实体宏
/// - 若缺失则追加字段：`id: IdType`、`events: PendingEvents`（不参与序列化），并置于字段最前
/// - 自动实现 `::mediator_domain::entity::Entity`
/// - 参数：`#[entity(id = IdType, debug = true|false)]`，`id` 默认 `String`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 实体标识宏，仅支持单字段 tuple struct，例如 `struct UserId(String);`
/// - 参数：`#[entity_id(debug = true|false)]`
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 领域事件宏，适用于结构体与枚举
/// - 参数：`#[domain_event(name = "...", debug = true|false)]`，`name` 默认为类型名
#[proc_macro_attribute]
pub fn domain_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    domain_event::expand(attr, item)
}
