//! 认证状态管理
//!
//! `AuthStore` 管理内存中的会话，并与持久化存储中的 `token`/`user` 保持同步。
//! 会话通道挂在 `HttpClient` 上，所以 401 处理路径也能直接清空它；
//! 状态通过 `watch` 通道广播，界面层订阅即可感知变化。

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::{HttpClient, RequestOptions};
use crate::common::{AppError, AppResult};
use crate::model::{
    Credentials, RegisterRequest, Session, SessionResponse, TokenResponse, UpdateProfileRequest,
    User,
};
use crate::storage::{Storage, TOKEN_KEY, USER_KEY};

#[derive(Clone)]
pub struct AuthStore {
    http: HttpClient,
    state: Arc<watch::Sender<Session>>,
}

impl AuthStore {
    /// 持久化存储中的内容要等 `check_auth` 才会读入
    pub fn new(http: HttpClient) -> Self {
        let state = http.session().clone();
        Self { http, state }
    }

    /// 当前会话的快照
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    /// 登录
    ///
    /// 成功时把 token 与用户同时写入内存和持久化存储；
    /// 失败时会话保持不变，错误（提示已由 HTTP 客户端弹出）交还调用方。
    pub async fn login(&self, credentials: &Credentials) -> AppResult<User> {
        let options = RequestOptions::new().json(credentials)?;

        self.set_loading(true);
        let response = match self.http.post::<SessionResponse>("/session", options).await {
            Ok(response) => response,
            Err(e) => {
                self.set_loading(false);
                return Err(e);
            }
        };

        let SessionResponse { token, user } = response;
        if let Err(e) = self.persist(&token, &user) {
            self.set_loading(false);
            return Err(e);
        }

        self.http.login_redirect().reset();
        self.state
            .send_replace(Session::authenticated(user.clone(), token));
        tracing::info!("user {} logged in", user.email);

        Ok(user)
    }

    /// 注销：清除内存与持久化存储，不做跳转
    pub fn logout(&self) {
        let storage = self.storage();
        storage.delete(TOKEN_KEY);
        storage.delete(USER_KEY);
        self.state.send_replace(Session::empty());
        tracing::info!("session cleared");
    }

    /// 从持久化存储重建会话
    ///
    /// 不访问服务端：只要 token 与用户都在就视为已认证，
    /// 过期 token 会在下一次请求收到 401 时被清除。
    /// 只有其中一个键（或用户无法解析）时两者一起删除。
    pub fn check_auth(&self) -> bool {
        self.set_loading(true);

        let storage = self.storage();
        let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let raw_user = storage.get(USER_KEY);
        let user = raw_user.as_deref().and_then(|raw| {
            serde_json::from_str::<User>(raw)
                .map_err(|e| tracing::warn!("stored user is unreadable: {}", e))
                .ok()
        });

        let session = match (token, user) {
            (Some(token), Some(user)) => Session::authenticated(user, token),
            (None, None) if raw_user.is_none() => Session::empty(),
            _ => {
                tracing::warn!("discarding incomplete stored session");
                storage.delete(TOKEN_KEY);
                storage.delete(USER_KEY);
                Session::empty()
            }
        };

        let authenticated = session.is_authenticated;
        if authenticated {
            // 会话可能由别处的登录恢复，之后的 401 需要重新跳转
            self.http.login_redirect().reset();
        }
        self.state.send_replace(session);
        authenticated
    }

    pub async fn register(&self, data: &RegisterRequest) -> AppResult<Value> {
        self.http
            .post("/register", RequestOptions::new().json(data)?)
            .await
    }

    pub async fn get_profile(&self) -> AppResult<User> {
        let user: User = self.http.get("/profile", RequestOptions::new()).await?;
        self.replace_user(&user)?;
        Ok(user)
    }

    pub async fn update_profile(&self, data: &UpdateProfileRequest) -> AppResult<User> {
        let user: User = self
            .http
            .put("/profile", RequestOptions::new().json(data)?)
            .await?;
        self.replace_user(&user)?;
        Ok(user)
    }

    /// 换取新 token，用户保持不变
    pub async fn refresh_token(&self) -> AppResult<String> {
        let TokenResponse { token } = self
            .http
            .post::<TokenResponse>("/token/refresh", RequestOptions::new())
            .await?;

        if self.is_authenticated() {
            self.storage().set(TOKEN_KEY, &token);
            self.state.send_modify(|s| s.token = Some(token.clone()));
        }
        Ok(token)
    }

    fn storage(&self) -> &Arc<dyn Storage> {
        self.http.storage()
    }

    fn set_loading(&self, loading: bool) {
        self.state.send_modify(|s| s.is_loading = loading);
    }

    // token 与用户要么都写入，要么都不留
    fn persist(&self, token: &str, user: &User) -> AppResult<()> {
        let raw_user = serde_json::to_string(user)?;
        let storage = self.storage();
        if storage.set(USER_KEY, &raw_user) && storage.set(TOKEN_KEY, token) {
            return Ok(());
        }

        tracing::error!("failed to persist session, rolling back");
        storage.delete(TOKEN_KEY);
        storage.delete(USER_KEY);
        Err(AppError::Storage("failed to persist session".into()))
    }

    // 仅在已认证时替换用户，避免写出没有 token 的孤立用户
    fn replace_user(&self, user: &User) -> AppResult<()> {
        if !self.is_authenticated() {
            return Ok(());
        }
        let raw_user = serde_json::to_string(user)?;
        self.storage().set(USER_KEY, &raw_user);
        self.state.send_modify(|s| s.user = Some(user.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
