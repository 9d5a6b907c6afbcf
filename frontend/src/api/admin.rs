//! 管理服务：用户管理与图片库维护（均需管理员权限）。

use super::{ApiClient, ApiError, into_json};
use kudos_shared::{
    CreateUserRequest, ImageAsset, ToggleAdminRequest, UserActionResponse, UsersListResponse,
};
use web_sys::FormData;

// ---------------------------------------------------------
// 用户管理 (/users)
// ---------------------------------------------------------

pub async fn list_users(api: &ApiClient) -> Result<UsersListResponse, ApiError> {
    let response = api.get("/users").await?;
    into_json(response).await
}

pub async fn create_user(
    api: &ApiClient,
    payload: &CreateUserRequest,
) -> Result<UserActionResponse, ApiError> {
    let response = api.post_json("/users", payload).await?;
    into_json(response).await
}

pub async fn delete_user(api: &ApiClient, user_id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/users/{}", user_id)).await?;
    Ok(())
}

pub async fn toggle_admin(
    api: &ApiClient,
    user_id: i64,
    is_admin: bool,
) -> Result<UserActionResponse, ApiError> {
    let body = ToggleAdminRequest { is_admin };
    let response = api
        .patch_json(&format!("/users/toggle-admin/{}", user_id), &body)
        .await?;
    into_json(response).await
}

// ---------------------------------------------------------
// 图片库 (/admin/images)
// ---------------------------------------------------------

pub async fn list_admin_images(api: &ApiClient) -> Result<Vec<ImageAsset>, ApiError> {
    let response = api.get("/admin/images").await?;
    into_json(response).await
}

/// 上传一张新图片。`form` 需包含名为 `image` 的文件字段。
pub async fn upload_image(api: &ApiClient, form: FormData) -> Result<ImageAsset, ApiError> {
    let response = api.post_form("/admin/images", form).await?;
    into_json(response).await
}

pub async fn delete_image(api: &ApiClient, image_id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/admin/images/{}", image_id)).await?;
    Ok(())
}
