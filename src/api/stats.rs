use super::{HttpClient, RequestOptions};
use crate::common::AppResult;
use crate::model::Stats;

pub async fn get_stats(http: &HttpClient) -> AppResult<Stats> {
    http.get("/stats", RequestOptions::new()).await
}
