use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub tipo: String,
    pub mensagem: String,
}
