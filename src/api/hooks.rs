use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const LOGIN_PATH: &str = "/login";

/// 面向用户的短暂提示（toast）
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// 跳转到登录入口
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// 无界面时把提示写进日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(target: "toast", "{}", message);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect_to_login(&self) {
        tracing::info!("session invalidated, redirecting to {}", LOGIN_PATH);
    }
}

/// 幂等的登录跳转
///
/// 多个请求同时收到 401 时只会触发一次跳转，直到下一次登录成功后 `reset`。
#[derive(Clone)]
pub struct LoginRedirect {
    navigator: Arc<dyn Navigator>,
    fired: Arc<AtomicBool>,
}

impl LoginRedirect {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 返回本次调用是否真正触发了跳转
    pub fn fire(&self) -> bool {
        if self
            .fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.navigator.redirect_to_login();
            true
        } else {
            false
        }
    }

    pub fn reset(&self) {
        self.fired.store(false, Ordering::Release);
    }

    pub fn is_pending(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}
