use async_trait::async_trait;
use mediator_application::Bootstrapper;
use mediator_application::command::Command;
use mediator_application::command_handler::CommandHandler;
use mediator_application::context::{AppContext, BusinessContext};
use mediator_application::error::AppError;
use mediator_application::event_handler::EventHandler;
use mediator_application::transaction::Transaction;
use mediator_domain::domain_event::EventEnvelope;
use mediator_domain::error::{DomainError, DomainResult};
use mediator_macros::domain_event;

#[domain_event]
struct UserCreated {
    name: String,
}

#[domain_event]
struct WelcomeSent {
    name: String,
}

struct CreateUser {
    name: String,
}

impl Command for CreateUser {
    const NAME: &'static str = "CreateUser";
    type Output = String;

    fn validate(&self) -> DomainResult<()> {
        if self.name.is_empty() {
            return Err(DomainError::invalid_command("name cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Default)]
struct CreateUserHandler {
    events: Vec<EventEnvelope>,
}

#[async_trait]
impl Transaction for CreateUserHandler {
    async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        println!("CreateUser: commit");
        Ok(())
    }

    async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        println!("CreateUser: rollback");
        Ok(())
    }

    fn events(&self) -> Vec<EventEnvelope> {
        self.events.clone()
    }
}

#[async_trait]
impl CommandHandler<CreateUser> for CreateUserHandler {
    async fn handle(&mut self, _ctx: &AppContext, cmd: CreateUser) -> Result<String, AppError> {
        println!("CreateUser: name={}", cmd.name);
        self.events.push(EventEnvelope::new(UserCreated {
            name: cmd.name.clone(),
        }));
        Ok(format!("user-{}", cmd.name.to_lowercase()))
    }
}

#[derive(Default)]
struct SendWelcome {
    events: Vec<EventEnvelope>,
}

#[async_trait]
impl Transaction for SendWelcome {
    async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        Ok(())
    }

    async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        Ok(())
    }

    fn events(&self) -> Vec<EventEnvelope> {
        self.events.clone()
    }
}

#[async_trait]
impl EventHandler<UserCreated> for SendWelcome {
    async fn handle(&mut self, _ctx: &AppContext, event: &UserCreated) -> Result<(), AppError> {
        println!("UserCreated -> welcome {}", event.name);
        self.events.push(EventEnvelope::new(WelcomeSent {
            name: event.name.clone(),
        }));
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let boot = Bootstrapper::new();
    boot.register_command::<CreateUser, _, _>(|| Ok(CreateUserHandler::default()))?
        .register_event::<UserCreated, _, _>(|| Ok(SendWelcome::default()))?;
    boot.ensure_command::<CreateUser>()?;

    let ctx = AppContext {
        idempotency_key: Some("idem-1".into()),
        ..AppContext::new(
            BusinessContext::builder()
                .correlation_id("cor-1".into())
                .actor_type("user".into())
                .actor_id("u-1".into())
                .build(),
        )
    };

    let id = boot
        .handle_command(
            &ctx,
            CreateUser {
                name: "Alice".into(),
            },
        )
        .await?;
    println!("created {id}");

    // 校验失败 -> bad_request，处理器不会被构造
    if let Err(err) = boot
        .handle_command(&ctx, CreateUser { name: String::new() })
        .await
    {
        println!("rejected: status={} message={}", err.status(), err.message());
    }

    Ok(())
}
