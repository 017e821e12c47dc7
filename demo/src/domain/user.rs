use super::events::{EmailChanged, EmailSet};
use mediator_domain::entity::Entity;
use mediator_macros::{entity, entity_id};

#[entity_id]
pub struct UserId(String);

#[entity(id = UserId)]
pub struct User {
    email: String,
}

impl User {
    pub fn with_email(id: UserId, email: impl Into<String>) -> Self {
        let mut user = Self::new(id);
        user.email = email.into();
        user
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// 保存邮箱；非空且与原值不同时记录 `EmailSet`
    pub fn set_email(&mut self, value: &str) {
        if let Some(original) = self.replace_email(value) {
            self.record(EmailSet {
                user_id: self.id().to_string(),
                original_email: original,
                new_email: value.to_string(),
            });
        }
    }

    /// 更换邮箱；非空且与原值不同时记录 `EmailChanged`
    pub fn change_email(&mut self, value: &str) {
        if let Some(original) = self.replace_email(value) {
            self.record(EmailChanged {
                user_id: self.id().to_string(),
                original_email: original,
                new_email: value.to_string(),
            });
        }
    }

    fn replace_email(&mut self, value: &str) -> Option<String> {
        if value.is_empty() || self.email == value {
            return None;
        }
        Some(std::mem::replace(&mut self.email, value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediator_domain::domain_event::DomainEvent;

    fn kamel() -> User {
        User::with_email(UserId::new("1".into()), "kamel@y")
    }

    #[test]
    fn set_email_records_one_event() {
        let mut user = kamel();
        user.set_email("eli@x");

        assert_eq!(user.email(), "eli@x");
        assert_eq!(user.pending_events().names(), vec![EmailSet::NAME]);
        let event = user.pending_events()[0].downcast_ref::<EmailSet>().unwrap();
        assert_eq!(event.original_email, "kamel@y");
        assert_eq!(event.new_email, "eli@x");
        assert_eq!(user.pending_events()[0].metadata.source_id(), Some("1"));
    }

    #[test]
    fn same_or_empty_value_is_a_no_op() {
        let mut user = kamel();
        user.set_email("kamel@y");
        user.change_email("");

        assert_eq!(user.email(), "kamel@y");
        assert!(user.pending_events().is_empty());
    }

    #[test]
    fn change_email_records_email_changed() {
        let mut user = kamel();
        user.change_email("eli@x");

        let event = user.pending_events()[0]
            .downcast_ref::<EmailChanged>()
            .unwrap();
        assert_eq!(
            event,
            &EmailChanged {
                user_id: "1".into(),
                original_email: "kamel@y".into(),
                new_email: "eli@x".into(),
            }
        );
    }
}
