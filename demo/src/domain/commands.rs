use mediator_application::command::Command;
use mediator_domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// 保存用户资料（worker 从消息队列读取的消息）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveUserCommand {
    pub user_id: String,
    pub email: String,
}

impl Command for SaveUserCommand {
    const NAME: &'static str = "SaveUser";
    type Output = ();

    fn validate(&self) -> DomainResult<()> {
        if self.user_id.is_empty() {
            return Err(DomainError::invalid_command("user ID cannot be empty"));
        }
        if self.email.is_empty() {
            return Err(DomainError::invalid_command("email cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEmailCommand {
    pub user_id: String,
    pub new_email: String,
}

impl Command for ChangeEmailCommand {
    const NAME: &'static str = "ChangeEmail";
    type Output = ();

    fn validate(&self) -> DomainResult<()> {
        if self.user_id.is_empty() {
            return Err(DomainError::invalid_command("user ID cannot be empty"));
        }
        if self.new_email.is_empty() {
            return Err(DomainError::invalid_command("new email cannot be empty"));
        }
        Ok(())
    }
}
