//! 示例处理器：用户命令与邮箱相关事件的订阅方

mod command_handlers;
mod event_handlers;

pub use command_handlers::{ChangeEmailHandler, SaveUserHandler};
pub use event_handlers::{
    EMAIL_CHANGED_TITLE, EmailChangedHandler, EmailSetHandler, KpiHandler, NOREPLY_SENDER,
    NotifySlackHandler,
};
