//! 示例应用：用内存适配器演示命令分发与事件级联

pub mod adapters;
pub mod bootstrapper;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod telemetry;
pub mod worker;

pub use bootstrapper::DemoBootstrapper;
pub use config::{ConfigError, WorkerConfig};
