//! 会话模块
//!
//! "谁在登录"的唯一事实来源。负责：
//! - 登录 / 注销 / 注册 / 资料更新四个操作
//! - 会话在 LocalStorage 中的持久化与启动时恢复
//!   （`user` 与 `token` 两个键必须同生共死，残缺的一半视为没有）
//! - 订阅 HTTP 层广播的会话失效事件，执行服务端发起的注销
//!
//! 所有操作把远端失败转换为 `Err(用户可读消息)`，从不 panic。
//! 注销后的导航由路由服务监听认证信号自动完成，这里不做跳转。

use crate::api::{self, ApiClient, ApiError, SESSION_INVALIDATED_EVENT};
use crate::web::LocalStorage;
use kudos_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

/// 会话状态
#[derive(Clone, Default)]
pub struct SessionState {
    /// 当前用户（登录后存在）
    pub user: Option<User>,
    /// 启动恢复是否仍在进行
    pub is_loading: bool,
    /// 注销是否在途（幂等保护）
    pub is_logging_out: bool,
}

/// 会话上下文，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    pub set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState {
            is_loading: true,
            ..Default::default()
        });
        Self { state, set_state }
    }

    /// 认证状态信号（注入路由服务用）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.is_some()))
    }

    /// 管理员状态信号（注入路由服务用）
    pub fn is_admin_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.as_ref().is_some_and(|u| u.is_admin)))
    }

    pub fn user_signal(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 两个存储键必须同时存在才算一份会话；任何一半缺失都按无会话处理。
fn restore_pair(user_json: Option<String>, token: Option<String>) -> Option<(User, String)> {
    let token = token.filter(|t| !t.is_empty())?;
    let user: User = serde_json::from_str(&user_json?).ok()?;
    Some((user, token))
}

/// 注销进入判定：返回 true 表示本次调用赢得执行权；
/// 已有注销在途时后到者拿到 false。
fn begin_logout(state: &mut SessionState) -> bool {
    if state.is_logging_out {
        return false;
    }
    state.is_logging_out = true;
    true
}

/// 注销收尾：清空用户并释放在途标志，两者一步完成。
fn finish_logout(state: &mut SessionState) {
    state.user = None;
    state.is_logging_out = false;
}

/// 初始化会话：从 LocalStorage 恢复，并订阅会话失效事件。
pub fn init_session(ctx: &SessionContext, api: &ApiClient) {
    let stored_user = LocalStorage::get(STORAGE_USER_KEY);
    let stored_token = LocalStorage::get(STORAGE_TOKEN_KEY);

    match restore_pair(stored_user, stored_token) {
        Some((user, token)) => {
            api.set_token(&token);
            ctx.set_state.update(|s| {
                s.user = Some(user);
                s.is_loading = false;
            });
            web_sys::console::log_1(&"[Session] Restored session from storage.".into());
        }
        None => {
            // 清掉可能残留的半份会话
            clear_session_storage();
            ctx.set_state.update(|s| s.is_loading = false);
        }
    }

    subscribe_invalidation(*ctx, api.clone());
}

/// 订阅 HTTP 层的会话失效广播（401 拦截器触发）。
fn subscribe_invalidation(ctx: SessionContext, api: ApiClient) {
    let closure = Closure::<dyn Fn()>::new(move || {
        let api = api.clone();
        spawn_local(async move {
            logout(&ctx, &api, true).await;
        });
    });

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback(
            SESSION_INVALIDATED_EVENT,
            closure.as_ref().unchecked_ref(),
        );
    }

    // 监听器与应用同寿命
    closure.forget();
}

/// 登录。成功后同时写入内存、持久存储与 HTTP 客户端。
pub async fn login(
    ctx: &SessionContext,
    api: &ApiClient,
    email: &str,
    password: &str,
) -> Result<(), String> {
    match api::auth::sign_in(api, email, password).await {
        Ok(session) => {
            api.set_token(&session.token);
            persist_session(&session.user, &session.token);
            ctx.set_state.update(|s| s.user = Some(session.user));
            Ok(())
        }
        // 登录接口自身的 401 是"密码错误"，不是会话过期
        Err(ApiError::Unauthorized) => Err("Invalid email or password.".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// 注销。并发调用只有一次真正执行（幂等）。
///
/// `server_initiated` 为 true 表示由 401 拦截器或身份提供方触发，
/// 此时不再回调注销端点。
pub async fn logout(ctx: &SessionContext, api: &ApiClient, server_initiated: bool) {
    let mut won = false;
    ctx.set_state.update(|s| won = begin_logout(s));
    if !won {
        return;
    }

    if !server_initiated {
        if let Err(e) = api::auth::sign_out(api).await {
            web_sys::console::error_1(
                &format!("[Session] Sign-out notification failed: {}", e).into(),
            );
        }
    }

    api.clear_token();
    clear_session_storage();
    ctx.set_state.update(finish_logout);
    // 导航由路由服务的认证监听自动处理
}

/// 注册。成功返回服务端提示；不自动登录。
pub async fn signup(
    api: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<String, String> {
    match api::auth::sign_up(api, name, email, password).await {
        Ok(message) => {
            Ok(message.unwrap_or_else(|| "Account created. You can sign in now.".to_string()))
        }
        Err(e) => Err(e.to_string()),
    }
}

/// 更新资料。成功后整体替换存储的用户对象并持久化。
pub async fn update_profile(
    ctx: &SessionContext,
    api: &ApiClient,
    name: &str,
) -> Result<String, String> {
    match api::auth::update_profile(api, name).await {
        Ok(updated) => {
            LocalStorage::set_json(STORAGE_USER_KEY, &updated.user);
            ctx.set_state.update(|s| s.user = Some(updated.user));
            Ok(updated
                .message
                .unwrap_or_else(|| "Profile updated.".to_string()))
        }
        Err(e) => Err(e.to_string()),
    }
}

fn persist_session(user: &User, token: &str) {
    LocalStorage::set_json(STORAGE_USER_KEY, user);
    LocalStorage::set(STORAGE_TOKEN_KEY, token);
}

fn clear_session_storage() {
    LocalStorage::delete(STORAGE_USER_KEY);
    LocalStorage::delete(STORAGE_TOKEN_KEY);
}

#[cfg(test)]
mod tests {
    use super::{SessionState, begin_logout, finish_logout, restore_pair};
    use kudos_shared::User;

    const USER_JSON: &str = r#"{"id":1,"name":"A","email":"a@b.com","isAdmin":false}"#;

    fn signed_in() -> SessionState {
        SessionState {
            user: Some(User {
                id: 1,
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                is_admin: false,
            }),
            is_loading: false,
            is_logging_out: false,
        }
    }

    #[test]
    fn restores_only_a_complete_pair() {
        let restored = restore_pair(Some(USER_JSON.to_string()), Some("t1".to_string()));
        let (user, token) = restored.unwrap();
        assert_eq!(user.email, "a@b.com");
        assert_eq!(token, "t1");
    }

    #[test]
    fn partial_state_counts_as_absent() {
        assert!(restore_pair(Some(USER_JSON.to_string()), None).is_none());
        assert!(restore_pair(None, Some("t1".to_string())).is_none());
        assert!(restore_pair(None, None).is_none());
    }

    #[test]
    fn corrupt_or_empty_halves_count_as_absent() {
        assert!(restore_pair(Some("not json".to_string()), Some("t1".to_string())).is_none());
        assert!(restore_pair(Some(USER_JSON.to_string()), Some(String::new())).is_none());
    }

    #[test]
    fn only_the_first_concurrent_logout_wins() {
        let mut state = signed_in();
        assert!(begin_logout(&mut state));
        // A second logout while one is in flight is a no-op
        assert!(!begin_logout(&mut state));
        assert!(state.user.is_some());
    }

    #[test]
    fn finishing_a_logout_clears_user_and_releases_the_guard() {
        let mut state = signed_in();
        assert!(begin_logout(&mut state));
        finish_logout(&mut state);
        assert!(state.user.is_none());
        assert!(!state.is_logging_out);

        // A later logout can enter again
        assert!(begin_logout(&mut state));
    }
}
