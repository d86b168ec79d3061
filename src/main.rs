use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alocacao_client::api::{HttpClient, LoginRedirect, TracingNavigator, TracingNotifier};
use alocacao_client::conf;
use alocacao_client::model::Credentials;
use alocacao_client::service::{AuthStore, HydrationController, NotificationPoller};
use alocacao_client::storage::FileStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化配置
    let config = conf::Settings::global();

    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log.level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let storage = Arc::new(FileStorage::open(&config.storage.path)?);
    let http = HttpClient::new(
        &config.api.base_url,
        storage,
        Arc::new(TracingNotifier),
        LoginRedirect::new(Arc::new(TracingNavigator)),
    )?;
    tracing::info!("using API at {}", http.base_url());

    let store = AuthStore::new(http.clone());
    let (controller, _events) = HydrationController::mount(store.clone());
    controller.wait_hydrated().await;

    if !store.is_authenticated() {
        if let (Ok(email), Ok(senha)) = (std::env::var("ALOCACAO_EMAIL"), std::env::var("ALOCACAO_SENHA")) {
            let user = store.login(&Credentials { email, senha }).await?;
            tracing::info!("logged in as {} ({})", user.nome, user.role.as_str());
        } else {
            tracing::warn!("no stored session; set ALOCACAO_EMAIL and ALOCACAO_SENHA to log in");
        }
    }

    let poller = NotificationPoller::start(
        http,
        Duration::from_secs(config.polling.notification_interval_secs),
    );
    let mut unread = poller.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = unread.changed() => {
                if changed.is_err() {
                    break;
                }
                let count = *unread.borrow_and_update();
                tracing::info!("{} unread notifications", count);
            }
        }
    }

    poller.stop();
    controller.unmount().await;
    tracing::info!("shutting down");

    Ok(())
}
