use super::*;
use crate::storage::{Storage, TOKEN_KEY, USER_KEY};
use crate::test_support::{harness, sample_user, Harness};

fn store_with_session() -> (Harness, AuthStore) {
    let h = harness("http://127.0.0.1:9");
    h.storage.set(TOKEN_KEY, "abc");
    h.storage
        .set(USER_KEY, &serde_json::to_string(&sample_user()).unwrap());
    let store = AuthStore::new(h.http.clone());
    (h, store)
}

// =============================================================================
// first check
// =============================================================================

#[tokio::test]
async fn mount_starts_in_loading_phase() {
    let (_h, store) = store_with_session();
    let (controller, _events) = HydrationController::mount(store);

    assert_eq!(controller.phase(), HydrationPhase::Loading);
    assert_eq!(controller.gate(|| "spinner", || "children"), "spinner");
}

#[tokio::test]
async fn renders_children_after_first_check() {
    let (_h, store) = store_with_session();
    let (controller, _events) = HydrationController::mount(store.clone());

    assert!(controller.wait_hydrated().await);

    assert_eq!(controller.gate(|| "spinner", || "children"), "children");
    assert!(store.is_authenticated());
    assert_eq!(controller.checks_completed(), 1);
}

#[tokio::test]
async fn hydrates_even_when_unauthenticated() {
    let h = harness("http://127.0.0.1:9");
    let store = AuthStore::new(h.http.clone());
    let (controller, _events) = HydrationController::mount(store.clone());

    assert!(controller.wait_hydrated().await);
    assert!(controller.is_hydrated());
    assert!(!store.is_authenticated());
}

// =============================================================================
// revalidation triggers
// =============================================================================

#[tokio::test]
async fn each_focus_triggers_one_check() {
    let (_h, store) = store_with_session();
    let (controller, events) = HydrationController::mount(store);
    controller.wait_hydrated().await;

    assert!(events.focus());
    assert!(events.focus());
    assert!(controller.wait_for_checks(3).await);

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(controller.checks_completed(), 3);
}

#[tokio::test]
async fn only_becoming_visible_triggers_check() {
    let (_h, store) = store_with_session();
    let (controller, events) = HydrationController::mount(store);
    controller.wait_hydrated().await;

    events.visibility(Visibility::Hidden);
    events.visibility(Visibility::Visible);
    assert!(controller.wait_for_checks(2).await);

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(controller.checks_completed(), 2);
}

#[tokio::test]
async fn revalidation_updates_session_without_reloading() {
    let (h, store) = store_with_session();
    let (controller, events) = HydrationController::mount(store.clone());
    controller.wait_hydrated().await;
    assert!(store.is_authenticated());

    // 另一个标签页注销
    h.storage.delete(TOKEN_KEY);
    h.storage.delete(USER_KEY);
    events.focus();
    controller.wait_for_checks(2).await;

    assert!(!store.is_authenticated());
    assert_eq!(controller.phase(), HydrationPhase::Hydrated);
}

#[tokio::test]
async fn events_before_hydration_are_processed_after_it() {
    let (_h, store) = store_with_session();
    let (controller, events) = HydrationController::mount(store);

    events.focus();
    assert!(controller.wait_for_checks(2).await);
    assert!(controller.is_hydrated());
}

// =============================================================================
// unmount
// =============================================================================

#[tokio::test]
async fn unmount_detaches_listeners() {
    let (_h, store) = store_with_session();
    let (controller, events) = HydrationController::mount(store);
    controller.wait_hydrated().await;

    controller.unmount().await;

    assert!(!events.focus());
    assert!(!events.visibility(Visibility::Visible));
}

#[tokio::test]
async fn drop_detaches_listeners() {
    let (_h, store) = store_with_session();
    let (controller, events) = HydrationController::mount(store);
    controller.wait_hydrated().await;

    drop(controller);
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    assert!(!events.focus());
}
