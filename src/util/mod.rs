use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// 周期性任务
///
/// 立即执行一次，之后每隔 `period` 执行一次；被 drop 或 `cancel` 时中止，
/// 之后不会再产生任何结果。
pub struct PeriodicTask {
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // 上一轮耗时过长时顺延，不补发
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick().await;
            }
        });

        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "util_test.rs"]
mod tests;
