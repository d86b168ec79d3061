//! 通知轮询
//!
//! 顶栏铃铛的未读数量。失败只记 debug 日志，不弹提示；
//! 停止后不会再写入任何结果。

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::api::{notifications, HttpClient};
use crate::util::PeriodicTask;

pub struct NotificationPoller {
    unread: watch::Receiver<usize>,
    task: PeriodicTask,
}

impl NotificationPoller {
    pub fn start(http: HttpClient, period: Duration) -> Self {
        let (tx, unread) = watch::channel(0usize);
        let tx = Arc::new(tx);

        let task = PeriodicTask::spawn(period, move || {
            let http = http.clone();
            let tx = tx.clone();
            async move {
                match notifications::unread_count_silent(&http).await {
                    Ok(count) => {
                        tx.send_replace(count);
                    }
                    Err(e) => tracing::debug!("notification poll failed: {}", e),
                }
            }
        });

        Self { unread, task }
    }

    pub fn unread(&self) -> usize {
        *self.unread.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.unread.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    pub fn stop(&self) {
        self.task.cancel();
    }
}

#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;
