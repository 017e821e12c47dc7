use mediator_macros::entity_id;
use uuid::Uuid;

#[entity_id]
struct UserId(String);

#[entity_id(debug = false)]
struct SessionId(Uuid);

impl std::fmt::Debug for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionId(..)")
    }
}

fn main() {
    let id: UserId = "1".parse().unwrap();
    assert_eq!(id.to_string(), "1");
    assert_eq!(id.as_inner(), "1");
    assert_eq!(id, UserId::from("1".to_string()));
    let raw: String = id.into();
    assert_eq!(raw, "1");

    let sid = SessionId::new(Uuid::new_v4());
    assert_eq!(format!("{:?}", sid), "SessionId(..)"); // 手写 Debug 可编译说明未自动派生
}
