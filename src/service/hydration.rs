//! 会话水合控制器
//!
//! 挂载后立即执行一次 `check_auth`，在此之前界面只显示加载指示；
//! 之后每次窗口获得焦点或页面重新可见都会再执行一次 `check_auth`，
//! 但不再回到加载状态。

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::auth::AuthStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationPhase {
    /// 首次检查尚未完成
    Loading,
    Hydrated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Focus,
    VisibilityChange(Visibility),
}

impl LifecycleEvent {
    fn triggers_check(self) -> bool {
        matches!(
            self,
            LifecycleEvent::Focus | LifecycleEvent::VisibilityChange(Visibility::Visible)
        )
    }
}

/// 页面生命周期事件的发送端，由宿主界面在焦点/可见性变化时调用
#[derive(Clone)]
pub struct LifecycleEvents {
    tx: mpsc::UnboundedSender<LifecycleEvent>,
}

impl LifecycleEvents {
    /// 控制器已卸载时返回 false
    pub fn focus(&self) -> bool {
        self.emit(LifecycleEvent::Focus)
    }

    pub fn visibility(&self, visibility: Visibility) -> bool {
        self.emit(LifecycleEvent::VisibilityChange(visibility))
    }

    pub fn emit(&self, event: LifecycleEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

pub struct HydrationController {
    phase: watch::Receiver<HydrationPhase>,
    checks: watch::Receiver<usize>,
    task: JoinHandle<()>,
}

impl HydrationController {
    /// 挂载控制器；返回时阶段一定是 `Loading`
    pub fn mount(store: AuthStore) -> (Self, LifecycleEvents) {
        let (phase_tx, phase) = watch::channel(HydrationPhase::Loading);
        let (checks_tx, checks) = watch::channel(0usize);
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run(store, rx, phase_tx, checks_tx));

        (
            Self {
                phase,
                checks,
                task,
            },
            LifecycleEvents { tx },
        )
    }

    pub fn phase(&self) -> HydrationPhase {
        *self.phase.borrow()
    }

    pub fn is_hydrated(&self) -> bool {
        self.phase() == HydrationPhase::Hydrated
    }

    /// 首次检查完成前返回 `loading()`，之后返回 `ready()`
    pub fn gate<T>(&self, loading: impl FnOnce() -> T, ready: impl FnOnce() -> T) -> T {
        if self.is_hydrated() {
            ready()
        } else {
            loading()
        }
    }

    /// 等待首次检查完成（无论结果如何）
    pub async fn wait_hydrated(&self) -> bool {
        let mut phase = self.phase.clone();
        let hydrated = phase
            .wait_for(|p| *p == HydrationPhase::Hydrated)
            .await
            .is_ok();
        hydrated
    }

    /// 已完成的 `check_auth` 次数（含首次）
    pub fn checks_completed(&self) -> usize {
        *self.checks.borrow()
    }

    pub async fn wait_for_checks(&self, count: usize) -> bool {
        let mut checks = self.checks.clone();
        let reached = checks.wait_for(|n| *n >= count).await.is_ok();
        reached
    }

    /// 卸载：停止任务并释放事件监听
    pub async fn unmount(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }
}

impl Drop for HydrationController {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    store: AuthStore,
    mut events: mpsc::UnboundedReceiver<LifecycleEvent>,
    phase: watch::Sender<HydrationPhase>,
    checks: watch::Sender<usize>,
) {
    let authenticated = store.check_auth();
    checks.send_modify(|n| *n += 1);
    phase.send_replace(HydrationPhase::Hydrated);
    tracing::debug!("session hydrated, authenticated = {}", authenticated);

    while let Some(event) = events.recv().await {
        if !event.triggers_check() {
            continue;
        }
        let authenticated = store.check_auth();
        checks.send_modify(|n| *n += 1);
        tracing::debug!("{:?} revalidated session, authenticated = {}", event, authenticated);
    }
}

#[cfg(test)]
#[path = "hydration_test.rs"]
mod tests;
