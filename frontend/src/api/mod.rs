//! HTTP 客户端封装
//!
//! 所有出站请求的统一入口：
//! - 维护可变的 Bearer Token，由会话层写入、每个请求读取
//! - 全局拦截 401 响应：清除 Token 与本地存储，并广播会话失效事件
//! - 其余错误状态原样归一化为 [`ApiError`]，交由调用方处理
//!
//! 没有任何重试策略；失败立即上抛。

use crate::web::LocalStorage;
use gloo_net::http::{Request, RequestBuilder, Response};
use kudos_shared::{ApiMessage, STORAGE_TOKEN_KEY, STORAGE_USER_KEY};
use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::FormData;

pub mod admin;
pub mod ai;
pub mod auth;
pub mod images;
pub mod recognitions;

/// 服务端拒绝 Token 时在 window 上广播的事件。
/// 会话层订阅它并执行服务端发起的注销。
pub const SESSION_INVALIDATED_EVENT: &str = "kudos:session-invalidated";

/// 请求层错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401：已在拦截器中处理，调用方不应再向用户展示
    Unauthorized,
    /// 其他非 2xx 状态，附带服务端消息（若可解析）
    Status { status: u16, message: String },
    /// 网络层失败（连接、DNS、CORS 等）
    Network(String),
    /// 响应体解析失败
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "session expired"),
            ApiError::Status { message, .. } => write!(f, "{}", message),
            ApiError::Network(_) => write!(f, "Failed to connect to the server."),
            ApiError::Decode(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// API 客户端
///
/// 启动时构造一次，随后克隆传入各个页面与服务。所有克隆共享同一个
/// Token 单元。
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: ArcRwSignal<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: ArcRwSignal::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 设置 Bearer Token（登录成功或会话恢复时调用）
    pub fn set_token(&self, token: &str) {
        self.token.set(Some(token.to_string()));
    }

    /// 清除 Bearer Token（注销或 401 时调用）
    pub fn clear_token(&self) {
        self.token.set(None);
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        self.token.with_untracked(|token| match token.as_deref() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        })
    }

    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let builder = self.with_auth(Request::get(&self.url(path)));
        self.dispatch(builder.send().await).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, ApiError> {
        let builder = self.with_auth(Request::delete(&self.url(path)));
        self.dispatch(builder.send().await).await
    }

    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let request = self
            .with_auth(Request::post(&self.url(path)))
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(request.send().await).await
    }

    pub async fn put_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let request = self
            .with_auth(Request::put(&self.url(path)))
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(request.send().await).await
    }

    pub async fn patch_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let request = self
            .with_auth(Request::patch(&self.url(path)))
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(request.send().await).await
    }

    /// Multipart 上传。不设置 Content-Type，交给浏览器附加 boundary。
    pub async fn post_form(&self, path: &str, form: FormData) -> Result<Response, ApiError> {
        let request = self
            .with_auth(Request::post(&self.url(path)))
            .body(JsValue::from(form))
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(request.send().await).await
    }

    /// 统一的响应处理：网络错误、401 拦截、其余状态归一化。
    async fn dispatch(
        &self,
        sent: Result<Response, gloo_net::Error>,
    ) -> Result<Response, ApiError> {
        let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;

        if response.status() == 401 {
            web_sys::console::log_1(
                &"[Http] Token rejected by the server (401). Forcing logout.".into(),
            );
            self.invalidate_session();
            return Err(ApiError::Unauthorized);
        }

        if !response.ok() {
            let status = response.status();
            let message = match response.text().await {
                Ok(body) => serde_json::from_str::<ApiMessage>(&body)
                    .ok()
                    .and_then(|m| m.first_message().map(str::to_string)),
                Err(_) => None,
            };
            return Err(ApiError::Status {
                status,
                message: message
                    .unwrap_or_else(|| format!("request failed with status {}", status)),
            });
        }

        Ok(response)
    }

    /// 401 专用：清理本地痕迹并通知会话层。
    ///
    /// 拦截器先于调用方的结果处理执行，保证 401 触发的注销总是赢得
    /// 与在途请求成功回调的竞争。
    fn invalidate_session(&self) {
        self.clear_token();
        LocalStorage::delete(STORAGE_USER_KEY);
        LocalStorage::delete(STORAGE_TOKEN_KEY);

        if let Some(window) = web_sys::window() {
            if let Ok(event) = web_sys::CustomEvent::new(SESSION_INVALIDATED_EVENT) {
                let _ = window.dispatch_event(&event);
            }
        }
    }
}

/// 把成功响应解码为 JSON。
pub async fn into_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
