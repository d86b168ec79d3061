pub mod auth;
pub mod hydration;
pub mod poller;

pub use auth::AuthStore;
pub use hydration::{HydrationController, HydrationPhase, LifecycleEvent, LifecycleEvents, Visibility};
pub use poller::NotificationPoller;
