//! 排课分配系统的客户端核心
//!
//! - `api`: 统一的 HTTP 客户端与按资源划分的接口封装
//! - `service::auth`: 会话状态（登录、注销、从持久化存储恢复）
//! - `service::hydration`: 页面生命周期触发的会话重新校验
//! - `service::poller`: 后台通知轮询
//! - `storage`: 持久化键值存储

pub mod api;
pub mod common;
pub mod conf;
pub mod model;
pub mod service;
pub mod storage;
pub mod util;

#[cfg(test)]
mod test_support;

pub use common::{AppError, AppResult};
