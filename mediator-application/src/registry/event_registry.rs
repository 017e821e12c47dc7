use crate::{
    context::AppContext, error::AppError, event_handler::EventHandler, transaction::Transaction,
};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use mediator_domain::domain_event::{DomainEvent, EventEnvelope};
use std::any::{TypeId, type_name};
use std::marker::PhantomData;
use std::sync::Arc;

/// 按信封处理事件的订阅方；在此处一次性还原为具体事件类型
#[async_trait]
pub trait ErasedEventHandler: Transaction {
    async fn handle_envelope(
        &mut self,
        ctx: &AppContext,
        envelope: &EventEnvelope,
    ) -> Result<(), AppError>;
}

struct Typed<E, H> {
    inner: H,
    _event: PhantomData<fn() -> E>,
}

#[async_trait]
impl<E, H> Transaction for Typed<E, H>
where
    E: DomainEvent,
    H: EventHandler<E> + 'static,
{
    async fn commit(&mut self, ctx: &AppContext) -> Result<(), AppError> {
        self.inner.commit(ctx).await
    }

    async fn rollback(&mut self, ctx: &AppContext) -> Result<(), AppError> {
        self.inner.rollback(ctx).await
    }

    fn events(&self) -> Vec<EventEnvelope> {
        self.inner.events()
    }
}

#[async_trait]
impl<E, H> ErasedEventHandler for Typed<E, H>
where
    E: DomainEvent,
    H: EventHandler<E> + 'static,
{
    async fn handle_envelope(
        &mut self,
        ctx: &AppContext,
        envelope: &EventEnvelope,
    ) -> Result<(), AppError> {
        let Some(event) = envelope.downcast_ref::<E>() else {
            return Err(AppError::TypeMismatch {
                expected: type_name::<E>(),
                found: envelope.payload_type(),
            });
        };
        self.inner
            .handle_with_metadata(ctx, event, &envelope.metadata)
            .await
    }
}

type EventFactory =
    Arc<dyn Fn() -> Result<Box<dyn ErasedEventHandler>, AppError> + Send + Sync>;

/// 一个已注册的订阅方
#[derive(Clone)]
pub struct Subscriber {
    name: &'static str,
    factory: EventFactory,
}

impl Subscriber {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn build(&self) -> Result<Box<dyn ErasedEventHandler>, AppError> {
        (self.factory)().map_err(|source| AppError::HandlerConstruction {
            handler: self.name,
            source: Box::new(source),
        })
    }
}

struct Subscriptions {
    type_id: TypeId,
    type_name: &'static str,
    subscribers: Vec<Subscriber>,
}

/// 事件名称到订阅方列表的映射（扇出）
#[derive(Default)]
pub struct EventRegistry {
    entries: DashMap<&'static str, Subscriptions>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加订阅方；同一事件可注册多次，按注册顺序调用
    pub fn register<E, H, F>(&self, factory: F) -> Result<(), AppError>
    where
        E: DomainEvent,
        H: EventHandler<E> + 'static,
        F: Fn() -> Result<H, AppError> + Send + Sync + 'static,
    {
        let subscriber = Subscriber {
            name: type_name::<H>(),
            factory: Arc::new(move || {
                factory().map(|inner| {
                    Box::new(Typed::<E, H> {
                        inner,
                        _event: PhantomData,
                    }) as Box<dyn ErasedEventHandler>
                })
            }),
        };

        match self.entries.entry(E::NAME) {
            Entry::Occupied(mut occupied) => {
                let subs = occupied.get_mut();
                if subs.type_id != TypeId::of::<E>() {
                    return Err(AppError::NameCollision {
                        name: E::NAME,
                        registered: subs.type_name,
                        incoming: type_name::<E>(),
                    });
                }
                subs.subscribers.push(subscriber);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Subscriptions {
                    type_id: TypeId::of::<E>(),
                    type_name: type_name::<E>(),
                    subscribers: vec![subscriber],
                });
            }
        }
        Ok(())
    }

    /// 事件的全部订阅方（按注册顺序）；没有订阅方时为空
    pub fn resolve_all(&self, name: &str) -> Vec<Subscriber> {
        self.entries
            .get(name)
            .map(|subs| subs.subscribers.clone())
            .unwrap_or_default()
    }

    pub fn subscriber_count(&self, name: &str) -> usize {
        self.entries
            .get(name)
            .map_or(0, |subs| subs.subscribers.len())
    }

    /// 已有订阅方的事件名称（按字母序）
    pub fn registered_events(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.iter().map(|e| *e.key()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Greeted {
        who: String,
    }
    impl DomainEvent for Greeted {
        const NAME: &'static str = "Greeted";
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Impostor;
    impl DomainEvent for Impostor {
        const NAME: &'static str = "Greeted";
    }

    struct Recorder {
        tag: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Transaction for Recorder {
        async fn commit(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
            Ok(())
        }

        async fn rollback(&mut self, _ctx: &AppContext) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[async_trait]
    impl EventHandler<Greeted> for Recorder {
        async fn handle(&mut self, _ctx: &AppContext, event: &Greeted) -> Result<(), AppError> {
            self.seen
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.tag, event.who));
            Ok(())
        }
    }

    #[async_trait]
    impl EventHandler<Impostor> for Recorder {
        async fn handle(&mut self, _ctx: &AppContext, _event: &Impostor) -> Result<(), AppError> {
            Ok(())
        }
    }

    fn recorder(
        tag: &'static str,
        seen: &Arc<Mutex<Vec<String>>>,
    ) -> impl Fn() -> Result<Recorder, AppError> + Send + Sync + 'static {
        let seen = seen.clone();
        move || {
            Ok(Recorder {
                tag,
                seen: seen.clone(),
            })
        }
    }

    #[tokio::test]
    async fn subscribers_keep_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry = EventRegistry::new();
        registry.register::<Greeted, _, _>(recorder("first", &seen)).unwrap();
        registry.register::<Greeted, _, _>(recorder("second", &seen)).unwrap();

        let envelope = EventEnvelope::new(Greeted { who: "eli".into() });
        let ctx = AppContext::default();
        for subscriber in registry.resolve_all(envelope.name()) {
            let mut handler = subscriber.build().unwrap();
            handler.handle_envelope(&ctx, &envelope).await.unwrap();
        }

        assert_eq!(*seen.lock().unwrap(), vec!["first:eli", "second:eli"]);
        assert_eq!(registry.subscriber_count("Greeted"), 2);
    }

    #[test]
    fn unknown_event_has_no_subscribers() {
        let registry = EventRegistry::new();
        assert!(registry.resolve_all("Nobody").is_empty());
        assert!(registry.registered_events().is_empty());
    }

    #[test]
    fn colliding_event_types_are_rejected() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry = EventRegistry::new();
        registry.register::<Greeted, _, _>(recorder("a", &seen)).unwrap();

        let err = registry
            .register::<Impostor, _, _>(recorder("b", &seen))
            .unwrap_err();
        assert!(matches!(err, AppError::NameCollision { name: "Greeted", .. }));
        assert_eq!(registry.subscriber_count("Greeted"), 1);
    }

    #[tokio::test]
    async fn mismatched_payload_is_reported() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry = EventRegistry::new();
        registry.register::<Greeted, _, _>(recorder("a", &seen)).unwrap();

        // 同名但类型不同的事件不会被误当作 Greeted 处理
        let envelope = EventEnvelope::new(Impostor);
        let subscriber = &registry.resolve_all(envelope.name())[0];
        let mut handler = subscriber.build().unwrap();
        let err = handler
            .handle_envelope(&AppContext::default(), &envelope)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::TypeMismatch { .. }));
        assert!(seen.lock().unwrap().is_empty());
    }
}
