use serde::{Deserialize, Serialize};

use super::user::{Role, User};

/// 登录凭据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub senha: String,
}

/// `POST /session` 的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

/// `POST /token/refresh` 的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especializacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carga_horaria_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferencia: Option<String>,
}

/// 个人资料更新，只发送设置了的字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especializacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carga_horaria_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferencia: Option<String>,
}

/// 客户端会话状态
///
/// `is_authenticated` 仅在 `user` 与 `token` 同时存在时为 true。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            is_loading: false,
        }
    }
}
