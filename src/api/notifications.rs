use serde_json::Value;

use super::{resource_path, HttpClient, RequestOptions};
use crate::common::AppResult;
use crate::model::{Notificacao, NotificacoesResponse, NotificationStatus};

/// 按状态列出通知，`None` 表示全部
pub async fn list_notifications(
    http: &HttpClient,
    status: Option<NotificationStatus>,
) -> AppResult<Vec<Notificacao>> {
    fetch(http, status, RequestOptions::new()).await
}

/// 未读通知数量（顶栏铃铛）
pub async fn unread_count(http: &HttpClient) -> AppResult<usize> {
    fetch(http, Some(NotificationStatus::Pendente), RequestOptions::new())
        .await
        .map(|list| list.len())
}

/// 同 `unread_count`，但失败时不弹提示，供后台轮询使用
pub async fn unread_count_silent(http: &HttpClient) -> AppResult<usize> {
    fetch(http, Some(NotificationStatus::Pendente), RequestOptions::new().silent())
        .await
        .map(|list| list.len())
}

async fn fetch(
    http: &HttpClient,
    status: Option<NotificationStatus>,
    mut options: RequestOptions,
) -> AppResult<Vec<Notificacao>> {
    if let Some(status) = status {
        options = options.param("status", status.as_str());
    }

    let resp: NotificacoesResponse = http.get("/notificacoes", options).await?;
    Ok(resp.notificacoes)
}

pub async fn mark_as_read(http: &HttpClient, id: &str) -> AppResult<Value> {
    http.patch(&resource_path(&["notificacoes", id, "lida"])?, RequestOptions::new())
        .await
}
