use super::*;
use crate::common::AppError;
use crate::storage::{Storage, TOKEN_KEY};
use crate::test_support::{harness, spawn_stub};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counting_router(hits: Arc<AtomicUsize>, status: StatusCode) -> Router {
    Router::new().route(
        "/notificacoes",
        get(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                let body = json!({
                    "notificacoes": [
                        { "id": "n1", "titulo": "Sala", "mensagem": "Troca de sala", "status": "PENDENTE" },
                        { "id": "n2", "titulo": "Turma", "mensagem": "Nova turma", "status": "PENDENTE" }
                    ]
                });
                (status, Json(body))
            }
        }),
    )
}

#[tokio::test]
async fn publishes_unread_count() {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = harness(&spawn_stub(counting_router(hits, StatusCode::OK)).await);

    let poller = NotificationPoller::start(h.http.clone(), Duration::from_secs(30));
    let mut rx = poller.subscribe();
    rx.wait_for(|n| *n == 2).await.unwrap();

    assert_eq!(poller.unread(), 2);
}

#[tokio::test]
async fn failures_are_silent() {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = harness(&spawn_stub(counting_router(hits.clone(), StatusCode::BAD_GATEWAY)).await);

    let poller = NotificationPoller::start(h.http.clone(), Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(hits.load(Ordering::SeqCst) >= 2);
    assert_eq!(poller.unread(), 0);
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn silent_polling_still_invalidates_session_on_401() {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = harness(&spawn_stub(counting_router(hits, StatusCode::UNAUTHORIZED)).await);
    h.storage.set(TOKEN_KEY, "stale");

    let _poller = NotificationPoller::start(h.http.clone(), Duration::from_secs(30));
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(h.storage.get(TOKEN_KEY), None);
    assert_eq!(h.navigator.count(), 1);
}

#[tokio::test]
async fn stop_ends_polling() {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = harness(&spawn_stub(counting_router(hits.clone(), StatusCode::OK)).await);

    let poller = NotificationPoller::start(h.http.clone(), Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(70)).await;
    poller.stop();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let seen = hits.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(hits.load(Ordering::SeqCst), seen);
    assert!(!poller.is_running());
}

#[tokio::test]
async fn silent_option_only_suppresses_notification() {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = harness(&spawn_stub(counting_router(hits, StatusCode::BAD_GATEWAY)).await);

    let err = notifications::unread_count_silent(&h.http).await.unwrap_err();
    assert!(matches!(err, AppError::Api { .. }));
    assert!(h.notifier.messages().is_empty());

    notifications::unread_count(&h.http).await.unwrap_err();
    assert_eq!(h.notifier.messages().len(), 1);
}
