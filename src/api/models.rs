use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::model::ChatModel;

#[derive(Deserialize)]
pub struct SummarizeRequest {
    pub url: String,
    #[serde(default)]
    pub model: ChatModel,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    pub model: ChatModel,
    pub summary: String,
    pub word_count: usize,
    pub summarized_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ModelInfo {
    pub id: ChatModel,
    pub label: &'static str,
    pub hint: &'static str,
}

impl From<ChatModel> for ModelInfo {
    fn from(model: ChatModel) -> Self {
        ModelInfo {
            id: model,
            label: model.id(),
            hint: model.hint(),
        }
    }
}
