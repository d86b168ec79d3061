use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use url::Url;

use super::hooks::{LoginRedirect, Notifier};
use crate::common::{AppError, AppResult};
use crate::model::Session;
use crate::storage::{Storage, TOKEN_KEY, USER_KEY};

const REQUEST_TIMEOUT: u64 = 15;

/// 失败响应没有 `message` 字段时展示的提示
pub const GENERIC_ERROR_MESSAGE: &str = "Erro interno do servidor";

// 连接池绑定在创建它的运行时上，所以每个 HttpClient 各自持有一个
fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT))
        .tcp_keepalive(Duration::from_secs(15))
        .tcp_nodelay(true)
        .build()
        .unwrap_or_else(|_| {
            tracing::warn!("创建HTTP客户端失败，使用默认配置");
            reqwest::Client::new()
        })
}

/// 单次请求的可选部分
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    /// 失败时不弹提示（401 仍会清除会话并跳转）
    pub silent: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> AppResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// 共享的 HTTP 客户端
///
/// 每个请求都会：
/// - 从持久化存储读取 token，存在时附加 `Authorization: Bearer <token>`
/// - 401 时清除 token、用户与内存会话并跳转登录（不弹提示）
/// - 其他失败弹出一次提示后把错误交还调用方
///
/// 内存会话的通道也放在这里，由 `AuthStore` 管理，401 处理路径直接清空它。
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: Url,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    redirect: LoginRedirect,
    session: Arc<watch::Sender<Session>>,
}

impl HttpClient {
    pub fn new(
        base_url: &str,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        redirect: LoginRedirect,
    ) -> AppResult<Self> {
        Ok(Self {
            inner: build_client(),
            base_url: Url::parse(base_url)?,
            storage,
            notifier,
            redirect,
            session: Arc::new(watch::channel(Session::empty()).0),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn login_redirect(&self) -> &LoginRedirect {
        &self.redirect
    }

    pub fn session(&self) -> &Arc<watch::Sender<Session>> {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> AppResult<T> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> AppResult<T> {
        self.request(Method::POST, path, options).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> AppResult<T> {
        self.request(Method::PUT, path, options).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> AppResult<T> {
        self.request(Method::PATCH, path, options).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> AppResult<T> {
        self.request(Method::DELETE, path, options).await
    }

    /// 发送请求并把响应体原样解析为 `T`
    ///
    /// 空响应体按 JSON `null` 解析，所以无响应体的端点可以用 `()` 或 `Value`。
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> AppResult<T> {
        let url = self.url(path, &options.params)?;
        tracing::debug!("{} {}", method, url);

        let mut builder = self
            .inner
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");

        for (key, value) in &options.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        if let Some(token) = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("发送请求失败: {} {}: {}", method, path, e);
                if !options.silent {
                    self.notifier.error(GENERIC_ERROR_MESSAGE);
                }
                return Err(AppError::Request(e));
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized(&method, path);
            return Err(AppError::Unauthorized);
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!("读取响应内容失败: {} {}: {}", method, path, e);
            AppError::Request(e)
        })?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!("{} {} failed with {}: {}", method, path, status, message);
            if !options.silent {
                self.notifier.error(&message);
            }
            return Err(AppError::Api { status, message });
        }

        if body.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }

        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("解析API响应失败: {} {}: {}", method, path, e);
            AppError::SerdeJson(e)
        })
    }

    // 先清凭据与内存会话再跳转，调用方拿到错误时两者已经一致
    fn handle_unauthorized(&self, method: &Method, path: &str) {
        tracing::info!("{} {} returned 401, clearing session", method, path);
        self.storage.delete(TOKEN_KEY);
        self.storage.delete(USER_KEY);
        self.session.send_replace(Session::empty());
        self.redirect.fire();
    }

    fn url(&self, path: &str, params: &[(String, String)]) -> AppResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, path))?;

        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(url)
    }
}

/// 把若干路径段拼成已转义的路径，段内的 `/`、`?`、`#` 不会改变 URL 结构
pub fn resource_path(segments: &[&str]) -> AppResult<String> {
    let mut url = Url::parse("http://localhost/")?;
    url.path_segments_mut()
        .map_err(|_| AppError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

/// 从失败响应体的 `message` 字段提取提示，缺失时使用通用提示
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
