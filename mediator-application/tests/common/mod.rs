#![allow(dead_code)]

use async_trait::async_trait;
use mediator_application::command::Command;
use mediator_application::command_handler::CommandHandler;
use mediator_application::context::AppContext;
use mediator_application::error::AppError;
use mediator_application::event_handler::EventHandler;
use mediator_application::transaction::Transaction;
use mediator_domain::domain_event::EventEnvelope;
use mediator_domain::entity::Entity;
use mediator_domain::error::{DomainError, DomainResult};
use mediator_domain::repository::Repository;
use mediator_macros::{domain_event, entity, entity_id};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[entity_id]
pub struct UserId(String);

#[domain_event]
pub struct EmailChanged {
    pub user_id: String,
    pub old: String,
    pub new: String,
}

#[entity(id = UserId)]
pub struct User {
    pub email: String,
}

impl User {
    pub fn change_email(&mut self, email: &str) {
        if email.is_empty() || self.email == email {
            return;
        }
        let old = std::mem::replace(&mut self.email, email.to_string());
        let user_id = self.id().to_string();
        self.record(EmailChanged {
            user_id,
            old,
            new: email.to_string(),
        });
    }
}

/// 记录提交/回滚调用次数
#[derive(Clone, Default)]
pub struct Tally(Arc<Mutex<TallyState>>);

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TallyState {
    pub built: u32,
    pub commits: u32,
    pub rollbacks: u32,
}

impl Tally {
    pub fn state(&self) -> TallyState {
        *self.0.lock().unwrap()
    }

    fn update(&self, f: impl FnOnce(&mut TallyState)) {
        f(&mut self.0.lock().unwrap());
    }
}

#[derive(Clone, Default)]
pub struct UserStore(Arc<Mutex<HashMap<String, String>>>);

impl UserStore {
    pub fn with_user(id: &str, email: &str) -> Self {
        let store = Self::default();
        store.0.lock().unwrap().insert(id.into(), email.into());
        store
    }

    pub fn email(&self, id: &str) -> Option<String> {
        self.0.lock().unwrap().get(id).cloned()
    }
}

/// 单次调用的仓储会话：保存先暂存，提交时写入
pub struct UserSession {
    store: UserStore,
    tally: Tally,
    staged: Vec<User>,
}

impl UserSession {
    pub fn new(store: UserStore, tally: Tally) -> Self {
        Self {
            store,
            tally,
            staged: Vec::new(),
        }
    }
}

#[async_trait]
impl Repository<User> for UserSession {
    async fn find(&self, id: &UserId) -> DomainResult<User> {
        let email = self
            .store
            .email(id.as_inner())
            .ok_or_else(|| DomainError::not_found(format!("user {id}")))?;
        let mut user = User::new(id.clone());
        user.email = email;
        Ok(user)
    }

    async fn save(&mut self, entity: User) -> DomainResult<()> {
        self.staged.push(entity);
        Ok(())
    }

    async fn commit(&mut self) -> DomainResult<()> {
        self.tally.update(|s| s.commits += 1);
        let mut map = self.store.0.lock().unwrap();
        for user in &self.staged {
            map.insert(user.id().to_string(), user.email.clone());
        }
        Ok(())
    }

    async fn rollback(&mut self) -> DomainResult<()> {
        self.tally.update(|s| s.rollbacks += 1);
        self.staged.clear();
        Ok(())
    }

    fn saved_entities(&self) -> &[User] {
        &self.staged
    }
}

pub struct ChangeEmail {
    pub user_id: String,
    pub new_email: String,
}

impl Command for ChangeEmail {
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

pub struct ChangeEmailHandler {
    repo: UserSession,
}

impl ChangeEmailHandler {
    pub fn factory(
        store: UserStore,
        tally: Tally,
    ) -> impl Fn() -> Result<Self, AppError> + Send + Sync + 'static {
        move || {
            tally.update(|s| s.built += 1);
            Ok(Self {
                repo: UserSession::new(store.clone(), tally.clone()),
            })
        }
    }
}

#[async_trait]
impl Transaction for ChangeEmailHandler {
    async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        Ok(self.repo.commit().await?)
    }

    async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        Ok(self.repo.rollback().await?)
    }

    fn events(&self) -> Vec<EventEnvelope> {
        self.repo.saved_events()
    }
}

#[async_trait]
impl CommandHandler<ChangeEmail> for ChangeEmailHandler {
    async fn handle(&mut self, _ctx: &AppContext, cmd: ChangeEmail) -> Result<(), AppError> {
        let mut user = self.repo.find(&UserId::new(cmd.user_id)).await?;
        user.change_email(&cmd.new_email);
        self.repo.save(user).await?;
        Ok(())
    }
}

/// 记录收到的事件；`fail` 为真时处理失败
pub struct NotifyUser {
    tally: Tally,
    inbox: Arc<Mutex<Vec<EmailChanged>>>,
    fail: bool,
}

impl NotifyUser {
    pub fn factory(
        tally: Tally,
        inbox: Arc<Mutex<Vec<EmailChanged>>>,
        fail: bool,
    ) -> impl Fn() -> Result<Self, AppError> + Send + Sync + 'static {
        move || {
            tally.update(|s| s.built += 1);
            Ok(Self {
                tally: tally.clone(),
                inbox: inbox.clone(),
                fail,
            })
        }
    }
}

#[async_trait]
impl Transaction for NotifyUser {
    async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        self.tally.update(|s| s.commits += 1);
        Ok(())
    }

    async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
        self.tally.update(|s| s.rollbacks += 1);
        Ok(())
    }
}

#[async_trait]
impl EventHandler<EmailChanged> for NotifyUser {
    async fn handle(&mut self, _ctx: &AppContext, event: &EmailChanged) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::infra("smtp unavailable"));
        }
        self.inbox.lock().unwrap().push(event.clone());
        Ok(())
    }
}
