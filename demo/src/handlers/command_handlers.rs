use crate::domain::{ChangeEmailCommand, SaveUserCommand, User, UserId};
use async_trait::async_trait;
use mediator_application::command_handler::CommandHandler;
use mediator_application::context::AppContext;
use mediator_application::error::AppError;
use mediator_application::transaction::Transaction;
use mediator_domain::domain_event::EventEnvelope;
use mediator_domain::repository::Repository;

pub struct SaveUserHandler<R> {
    repository: R,
}

impl<R: Repository<User>> SaveUserHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: Repository<User>> Transaction for SaveUserHandler<R> {
    async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        Ok(self.repository.commit().await?)
    }

    async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        Ok(self.repository.rollback().await?)
    }

    fn events(&self) -> Vec<EventEnvelope> {
        self.repository.saved_events()
    }
}

#[async_trait]
impl<R: Repository<User>> CommandHandler<SaveUserCommand> for SaveUserHandler<R> {
    async fn handle(&mut self, _ctx: &AppContext, cmd: SaveUserCommand) -> Result<(), AppError> {
        let mut user = self.repository.find(&UserId::new(cmd.user_id)).await?;
        user.set_email(&cmd.email);
        self.repository.save(user).await?;
        Ok(())
    }
}

pub struct ChangeEmailHandler<R> {
    repository: R,
}

impl<R: Repository<User>> ChangeEmailHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: Repository<User>> Transaction for ChangeEmailHandler<R> {
    async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        Ok(self.repository.commit().await?)
    }

    async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        Ok(self.repository.rollback().await?)
    }

    fn events(&self) -> Vec<EventEnvelope> {
        self.repository.saved_events()
    }
}

#[async_trait]
impl<R: Repository<User>> CommandHandler<ChangeEmailCommand> for ChangeEmailHandler<R> {
    async fn handle(
        &mut self,
        ctx: &AppContext,
        cmd: ChangeEmailCommand,
    ) -> Result<(), AppError> {
        ctx.check()?;
        let mut user = self.repository.find(&UserId::new(cmd.user_id)).await?;
        user.change_email(&cmd.new_email);
        self.repository.save(user).await?;
        Ok(())
    }
}
