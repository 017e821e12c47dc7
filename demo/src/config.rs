//! Worker 配置，从环境变量读取（支持 `.env`）

use mediator_application::MessageBusConfig;
use mediator_application::message_bus::DEFAULT_MAX_CASCADE_EVENTS;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerConfig {
    pub max_cascade_events: usize,
    /// 以 JSON 输出日志
    pub log_json: bool,
    /// JSON-lines 格式的 `SaveUserCommand` 文件；缺省时使用内置示例消息
    pub commands_file: Option<PathBuf>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_cascade_events: DEFAULT_MAX_CASCADE_EVENTS,
            log_json: false,
            commands_file: None,
        }
    }
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_cascade_events = match lookup("MEDIATOR_MAX_CASCADE_EVENTS") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidValue("MEDIATOR_MAX_CASCADE_EVENTS")),
            },
            None => defaults.max_cascade_events,
        };

        let log_json = match lookup("MEDIATOR_LOG_JSON").as_deref() {
            Some("1" | "true") => true,
            Some("0" | "false") | None => false,
            Some(_) => return Err(ConfigError::InvalidValue("MEDIATOR_LOG_JSON")),
        };

        let commands_file = lookup("DEMO_COMMANDS_FILE")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            max_cascade_events,
            log_json,
            commands_file,
        })
    }

    pub fn message_bus(&self) -> MessageBusConfig {
        MessageBusConfig {
            max_cascade_events: self.max_cascade_events,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
