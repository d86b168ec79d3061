//! 后端 REST 接口
//!
//! `client` 是所有请求的唯一出口；其余模块是按资源划分的薄封装，
//! 每个函数对应一个端点，错误原样向上传播。

mod client;
mod hooks;

pub mod feedback;
pub mod links;
pub mod notifications;
pub mod stats;
pub mod users;

pub use client::{resource_path, HttpClient, RequestOptions, GENERIC_ERROR_MESSAGE};
pub use hooks::{LoginRedirect, Navigator, Notifier, TracingNavigator, TracingNotifier, LOGIN_PATH};

#[cfg(test)]
#[path = "services_test.rs"]
mod services_tests;
