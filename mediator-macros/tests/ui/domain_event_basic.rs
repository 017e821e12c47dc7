use mediator_domain::domain_event::{DomainEvent, EventEnvelope};
use mediator_macros::domain_event;

#[domain_event]
struct EmailSet {
    user_id: String,
    original: String,
    updated: String,
}

#[domain_event(name = "kpi")]
enum KpiEvent {
    Counted { action: String },
    Reset,
}

#[domain_event(name = "tick", debug = false)]
struct Tick;

impl std::fmt::Debug for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tick")
    }
}

fn main() {
    assert_eq!(EmailSet::NAME, "EmailSet");
    assert_eq!(KpiEvent::NAME, "kpi");
    assert_eq!(Tick::NAME, "tick");

    let env = EventEnvelope::new(EmailSet {
        user_id: "1".into(),
        original: "kamel@y".into(),
        updated: "eli@x".into(),
    });
    assert_eq!(env.name(), "EmailSet");
    assert!(env.is::<EmailSet>());
    assert!(env.downcast_ref::<Tick>().is_none());

    let reset = KpiEvent::Reset;
    assert_eq!(reset.clone(), KpiEvent::Reset);
    let _ = KpiEvent::Counted { action: "x".into() };
}
