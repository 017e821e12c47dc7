use mediator_demo::domain::{User, UserId};
use mediator_demo::{DemoBootstrapper, WorkerConfig, telemetry, worker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = WorkerConfig::from_env()?;
    telemetry::init_tracing(config.log_json);

    let boot = DemoBootstrapper::new(config.message_bus())?;
    boot.store.insert(&User::with_email(
        UserId::new(worker::SEED_USER_ID.to_string()),
        worker::SEED_EMAIL,
    ));

    let messages: Vec<String> = match &config.commands_file {
        Some(path) => tokio::fs::read_to_string(path)
            .await?
            .lines()
            .map(str::to_string)
            .collect(),
        None => vec![worker::SAMPLE_MESSAGE.to_string()],
    };

    let report = worker::run(&boot, messages).await;
    tracing::info!(
        handled = report.handled,
        malformed = report.malformed,
        failed = report.failed,
        published = boot.pubsub.published().await.len(),
        "worker finished"
    );

    Ok(())
}
