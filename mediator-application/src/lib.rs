//! 应用层：命令、处理器、注册表、工作单元与进程内中介者

pub mod bootstrapper;
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod context;
pub mod error;
pub mod event_handler;
pub mod message_bus;
pub mod registry;
pub mod transaction;
pub mod unit_of_work;

pub use bootstrapper::Bootstrapper;
pub use message_bus::{MessageBus, MessageBusConfig};
