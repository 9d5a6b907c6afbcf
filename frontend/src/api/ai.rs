//! AI 文案服务：根据类型与关键词生成表彰消息。

use super::{ApiClient, ApiError, into_json};
use kudos_shared::{GenerateMessageRequest, GenerateMessageResponse};

pub async fn generate_message(
    api: &ApiClient,
    recognition_type: &str,
    qualities: &str,
) -> Result<String, ApiError> {
    let body = GenerateMessageRequest {
        recognition_type: recognition_type.to_string(),
        qualities: qualities.to_string(),
    };
    let response = api.post_json("/recognitions/ai/generate", &body).await?;
    let generated: GenerateMessageResponse = into_json(response).await?;
    Ok(generated.message)
}
