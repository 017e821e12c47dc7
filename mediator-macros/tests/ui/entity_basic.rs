use mediator_domain::domain_event::DomainEvent;
use mediator_domain::entity::Entity;
use mediator_macros::{domain_event, entity};

#[domain_event]
struct NameSet {
    name: String,
}

#[entity]
struct Account {
    name: String,
}

#[entity(id = u64, debug = false)]
struct Counter {
    value: i64,
}

impl std::fmt::Debug for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Counter({})", self.value)
    }
}

fn main() {
    let mut account = Account::new("a-1".to_string());
    assert_eq!(account.id(), "a-1");
    assert!(account.pending_events().is_empty());

    account.name = "alice".into();
    let name = account.name.clone();
    account.record(NameSet { name });
    assert_eq!(account.pending_events().names(), vec![NameSet::NAME]);

    // 待发布事件不参与序列化
    let json = serde_json::to_value(&account).unwrap();
    assert!(json.get("events").is_none());
    assert_eq!(json["id"], "a-1");

    let counter = Counter::new(7);
    assert_eq!(*counter.id(), 7);
    assert_eq!(format!("{:?}", counter), "Counter(0)");
    let _ = format!("{:?}", account.clone());
}
