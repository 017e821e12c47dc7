//! Worker：逐条读取 `SaveUserCommand` 消息并分发
//!
//! 单条消息解析失败或处理失败只记录日志，不影响后续消息。

use crate::bootstrapper::DemoBootstrapper;
use crate::domain::SaveUserCommand;
use mediator_application::context::{AppContext, BusinessContext};
use uuid::Uuid;

pub const SEED_USER_ID: &str = "1";
pub const SEED_EMAIL: &str = "kamel.amin@thaabet.sy";
pub const SAMPLE_MESSAGE: &str = r#"{"user_id":"1","email":"eli.cohen@mossad.gov.il"}"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub handled: usize,
    pub malformed: usize,
    pub failed: usize,
}

pub async fn run<I, S>(boot: &DemoBootstrapper, messages: I) -> WorkerReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = WorkerReport::default();

    for message in messages {
        let message = message.as_ref().trim();
        if message.is_empty() {
            continue;
        }

        let cmd: SaveUserCommand = match serde_json::from_str(message) {
            Ok(cmd) => cmd,
            Err(err) => {
                tracing::warn!(error = %err, message, "failed to decode SaveUserCommand");
                report.malformed += 1;
                continue;
            }
        };

        let ctx = AppContext::new(
            BusinessContext::builder()
                .correlation_id(Uuid::new_v4().to_string())
                .actor_type("worker".into())
                .build(),
        );

        match boot.handle_command(&ctx, cmd).await {
            Ok(()) => report.handled += 1,
            Err(err) => {
                tracing::error!(
                    status = %err.status(),
                    error = %err.message(),
                    correlation_id = ctx.correlation_id().unwrap_or_default(),
                    "handle SaveUserCommand failed"
                );
                report.failed += 1;
            }
        }
    }

    report
}
