//! 认证服务：/auth 与 /users/profile 的请求组装。

use super::{ApiClient, ApiError, into_json};
use kudos_shared::{
    ApiMessage, SignInRequest, SignInResponse, SignUpRequest, UpdateProfileRequest,
    UpdateProfileResponse,
};

pub async fn sign_in(
    api: &ApiClient,
    email: &str,
    password: &str,
) -> Result<SignInResponse, ApiError> {
    let body = SignInRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let response = api.post_json("/auth/signin", &body).await?;
    into_json(response).await
}

/// 注册账号。成功时返回服务端的提示消息（若有）；不自动登录。
pub async fn sign_up(
    api: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Option<String>, ApiError> {
    let body = SignUpRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    let response = api.post_json("/auth/signup", &body).await?;
    let ack: ApiMessage = into_json(response).await.unwrap_or_default();
    Ok(ack.message)
}

/// 通知身份提供方注销。尽力而为；调用方只记录失败。
pub async fn sign_out(api: &ApiClient) -> Result<(), ApiError> {
    api.post_json("/auth/signout", &serde_json::json!({})).await?;
    Ok(())
}

pub async fn update_profile(
    api: &ApiClient,
    name: &str,
) -> Result<UpdateProfileResponse, ApiError> {
    let body = UpdateProfileRequest {
        name: name.to_string(),
    };
    let response = api.put_json("/users/profile", &body).await?;
    into_json(response).await
}
