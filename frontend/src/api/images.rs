//! 图片服务：面向普通用户的可用图片列表。

use super::{ApiClient, ApiError, into_json};
use kudos_shared::ImageAsset;

/// 列出当前可用于表彰的图片（仅需登录，不需要管理员权限）。
pub async fn list_images(api: &ApiClient) -> Result<Vec<ImageAsset>, ApiError> {
    let response = api.get("/images").await?;
    into_json(response).await
}
