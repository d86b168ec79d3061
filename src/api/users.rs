use serde_json::Value;

use super::{resource_path, HttpClient, RequestOptions};
use crate::common::AppResult;
use crate::model::{Role, UpdateProfileRequest, User};

pub async fn list_users(http: &HttpClient) -> AppResult<Vec<User>> {
    http.get("/users", RequestOptions::new()).await
}

pub async fn list_professors(http: &HttpClient) -> AppResult<Vec<User>> {
    http.get(
        "/users",
        RequestOptions::new().param("role", Role::Professor.as_str()),
    )
    .await
}

pub async fn get_user(http: &HttpClient, id: &str) -> AppResult<User> {
    http.get(&resource_path(&["users", id])?, RequestOptions::new())
        .await
}

pub async fn update_user(http: &HttpClient, id: &str, data: &UpdateProfileRequest) -> AppResult<User> {
    http.put(&resource_path(&["users", id])?, RequestOptions::new().json(data)?)
        .await
}

pub async fn delete_user(http: &HttpClient, id: &str) -> AppResult<Value> {
    http.delete(&resource_path(&["users", id])?, RequestOptions::new())
        .await
}
