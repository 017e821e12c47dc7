//! 中介者领域层基础库（mediator-domain）
//!
//! 定义命令/事件中介者所依赖的领域契约，与具体存储及传输实现解耦：
//! - 实体（`entity`）：唯一标识 + 只追加的待发布事件列表；
//! - 领域事件（`domain_event`）：稳定名称、类型擦除的事件信封与元数据；
//! - 仓储适配器（`repository`）：查找/保存/提交/回滚，并暴露已保存实体以收集事件；
//! - 错误（`error`）：带机器可读状态码（`ErrorStatus`）的领域错误。
//!
//! 典型用法：
//! 1. 使用 `#[entity]` 与 `#[domain_event]` 宏定义实体与事件；
//! 2. 在实体的变更方法中调用 `Entity::record` 记录事件；
//! 3. 由应用层的处理器在提交成功后上报这些事件，交由中介者级联分发。
//!
pub mod domain_event;
pub mod entity;
pub mod error;
pub mod repository;

// 允许在本 crate 内部通过 ::mediator_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::mediator_domain 路径。
extern crate self as mediator_domain;
