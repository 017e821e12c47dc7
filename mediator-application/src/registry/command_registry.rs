use crate::{
    command::Command, command_handler::CommandHandler, error::AppError,
};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;

pub type BoxedCommandHandler<C> = Box<dyn CommandHandler<C>>;

type CommandFactory<C> = Arc<dyn Fn() -> Result<BoxedCommandHandler<C>, AppError> + Send + Sync>;

struct Registration {
    type_id: TypeId,
    type_name: &'static str,
    handler: &'static str,
    // 实际类型为 CommandFactory<C>
    factory: Box<dyn Any + Send + Sync>,
}

/// 已解析的命令工厂，每次 `build` 构造一个新的处理器实例
pub struct ResolvedCommand<C: Command> {
    handler: &'static str,
    factory: CommandFactory<C>,
}

impl<C: Command> ResolvedCommand<C> {
    pub fn handler(&self) -> &'static str {
        self.handler
    }

    pub fn build(&self) -> Result<BoxedCommandHandler<C>, AppError> {
        (self.factory)().map_err(|source| AppError::HandlerConstruction {
            handler: self.handler,
            source: Box::new(source),
        })
    }
}

/// 命令名称到处理器工厂的一对一映射
#[derive(Default)]
pub struct CommandRegistry {
    entries: DashMap<&'static str, Registration>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命令处理器工厂
    ///
    /// 同一命令重复注册返回 `AlreadyRegisteredCommand`；
    /// 名称已被其它命令类型占用返回 `NameCollision`。
    pub fn register<C, H, F>(&self, factory: F) -> Result<(), AppError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
        F: Fn() -> Result<H, AppError> + Send + Sync + 'static,
    {
        match self.entries.entry(C::NAME) {
            Entry::Occupied(occupied) => {
                let existing = occupied.get();
                if existing.type_id == TypeId::of::<C>() {
                    Err(AppError::AlreadyRegisteredCommand { command: C::NAME })
                } else {
                    Err(AppError::NameCollision {
                        name: C::NAME,
                        registered: existing.type_name,
                        incoming: type_name::<C>(),
                    })
                }
            }
            Entry::Vacant(vacant) => {
                let factory: CommandFactory<C> =
                    Arc::new(move || factory().map(|h| Box::new(h) as BoxedCommandHandler<C>));

                vacant.insert(Registration {
                    type_id: TypeId::of::<C>(),
                    type_name: type_name::<C>(),
                    handler: type_name::<H>(),
                    factory: Box::new(factory),
                });
                Ok(())
            }
        }
    }

    /// 查找命令的工厂
    ///
    /// 名称未注册，或名称绑定的是另一个命令类型时，都视为未注册。
    pub fn resolve<C: Command>(&self) -> Option<ResolvedCommand<C>> {
        let entry = self.entries.get(C::NAME)?;
        if entry.type_id != TypeId::of::<C>() {
            return None;
        }

        let factory = entry.factory.downcast_ref::<CommandFactory<C>>()?;
        Some(ResolvedCommand {
            handler: entry.handler,
            factory: factory.clone(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// 已注册的命令名称（按字母序）
    pub fn registered_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.iter().map(|e| *e.key()).collect();
        names.sort_unstable();
        names
    }
}
