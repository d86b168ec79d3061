use reqwest::StatusCode;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// 持久化存储写入失败
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// 会话已失效，凭据已被清除
    #[error("Unauthorized")]
    Unauthorized,

    /// 服务端返回的非 2xx 响应（401 除外）
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
}

impl AppError {
    /// 获取失败响应的 HTTP 状态码（传输层错误没有状态码）
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
