//! 示例领域：用户与邮箱变更

mod commands;
mod events;
mod user;

pub use commands::{ChangeEmailCommand, SaveUserCommand};
pub use events::{EmailChanged, EmailSet, KpiEvent, NotifySlack};
pub use user::{User, UserId};
