use crate::{command::Command, context::AppContext, error::AppError, transaction::Transaction};
use async_trait::async_trait;

#[async_trait]
pub trait CommandHandler<C>: Transaction
where
    C: Command,
{
    async fn handle(&mut self, ctx: &AppContext, cmd: C) -> Result<C::Output, AppError>;
}
