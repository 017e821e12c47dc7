use super::{Counters, FailurePlan};
use crate::domain::{User, UserId};
use async_trait::async_trait;
use dashmap::DashMap;
use mediator_domain::entity::Entity;
use mediator_domain::error::{DomainError, DomainResult};
use mediator_domain::repository::Repository;
use std::sync::Arc;

/// 共享的用户存储（id -> email）
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<DashMap<String, String>>,
    counters: Counters,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: &User) {
        self.users
            .insert(user.id().to_string(), user.email().to_string());
    }

    pub fn email(&self, id: &str) -> Option<String> {
        self.users.get(id).map(|email| email.value().clone())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// 为一次处理器调用开启新的会话
    pub fn session(&self, failures: FailurePlan) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
            failures,
            staged: Vec::new(),
        }
    }
}

pub struct InMemoryUserRepository {
    store: InMemoryUserStore,
    failures: FailurePlan,
    staged: Vec<User>,
}

#[async_trait]
impl Repository<User> for InMemoryUserRepository {
    async fn find(&self, id: &UserId) -> DomainResult<User> {
        let email = self.store.email(id.as_inner()).ok_or_else(|| {
            DomainError::not_found(format!("user with id {:?} does not exist", id.as_inner()))
        })?;
        Ok(User::with_email(id.clone(), email))
    }

    async fn save(&mut self, entity: User) -> DomainResult<()> {
        self.staged.push(entity);
        Ok(())
    }

    async fn commit(&mut self) -> DomainResult<()> {
        self.store.counters.committed();
        if self.failures.commit {
            return Err(DomainError::repository("commit failed"));
        }
        for user in &self.staged {
            self.store.insert(user);
        }
        tracing::debug!(users = self.staged.len(), "user repository committed");
        Ok(())
    }

    async fn rollback(&mut self) -> DomainResult<()> {
        self.store.counters.rolled_back();
        if self.failures.rollback {
            return Err(DomainError::repository("rollback failed"));
        }
        self.staged.clear();
        Ok(())
    }

    fn saved_entities(&self) -> &[User] {
        &self.staged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, email: &str) -> User {
        User::with_email(UserId::new(id.into()), email)
    }

    #[tokio::test]
    async fn saves_are_applied_only_on_commit() {
        let store = InMemoryUserStore::new();
        store.insert(&user("1", "kamel@y"));

        let mut repo = store.session(FailurePlan::default());
        let mut found = repo.find(&UserId::new("1".into())).await.unwrap();
        found.set_email("eli@x");
        repo.save(found).await.unwrap();
        assert_eq!(store.email("1").as_deref(), Some("kamel@y"));
        assert_eq!(repo.saved_events().len(), 1);

        repo.commit().await.unwrap();
        assert_eq!(store.email("1").as_deref(), Some("eli@x"));
        assert_eq!(store.counters().commits(), 1);
    }

    #[tokio::test]
    async fn rollback_discards_staged_users() {
        let store = InMemoryUserStore::new();
        let mut repo = store.session(FailurePlan::default());
        repo.save(user("2", "a@b")).await.unwrap();
        repo.rollback().await.unwrap();

        assert!(repo.saved_entities().is_empty());
        assert!(store.is_empty());
        assert_eq!(store.counters().rollbacks(), 1);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let store = InMemoryUserStore::new();
        let repo = store.session(FailurePlan::default());
        let err = repo.find(&UserId::new("9".into())).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn forced_failures_are_reported() {
        let store = InMemoryUserStore::new();
        let mut repo = store.session(FailurePlan {
            commit: true,
            rollback: true,
        });

        assert!(repo.commit().await.is_err());
        assert!(repo.rollback().await.is_err());
        assert_eq!(store.counters().commits(), 1);
        assert_eq!(store.counters().rollbacks(), 1);
    }
}
