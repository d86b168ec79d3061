use serde_json::Value;

use super::{HttpClient, RequestOptions};
use crate::common::AppResult;
use crate::model::FeedbackRequest;

pub async fn submit_feedback(http: &HttpClient, feedback: &FeedbackRequest) -> AppResult<Value> {
    http.post("/feedback", RequestOptions::new().json(feedback)?)
        .await
}
