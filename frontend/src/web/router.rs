//! 路由服务模块 - 核心引擎
//!
//! 封装 History API，实现"监听 -> 验证 -> 处理 -> 加载"的导航流程。
//! 认证与管理员状态通过注入的信号检查，与会话系统解耦。
//! 未认证访问受保护页面时记住原始目的地，登录成功后送回原处。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 纯守卫决策：给定目标路由与认证/权限状态，返回实际应加载的路由，
/// 以及需要记住的"原始目的地"（仅当未认证被拦截时）。
fn resolve_target(
    target: AppRoute,
    is_auth: bool,
    is_admin: bool,
    pending: Option<AppRoute>,
) -> (AppRoute, Option<AppRoute>) {
    if target.requires_auth() && !is_auth {
        // 拦截并记住目的地，登录后送回
        return (AppRoute::auth_failure_redirect(), Some(target));
    }

    if target.should_redirect_when_authenticated() && is_auth {
        let destination = pending.unwrap_or_else(AppRoute::auth_success_redirect);
        return (destination, None);
    }

    if target.requires_admin() && !is_admin {
        return (AppRoute::auth_success_redirect(), None);
    }

    (target, None)
}

/// 路由器服务
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 未认证访问时记下的原始目的地
    pending_redirect: RwSignal<Option<AppRoute>>,
    is_authenticated: Signal<bool>,
    is_admin: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>, is_admin: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            pending_redirect: RwSignal::new(None),
            is_authenticated,
            is_admin,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        let is_admin = self.is_admin.get_untracked();
        let pending = self.pending_redirect.get_untracked();

        let (resolved, remember) = resolve_target(target, is_auth, is_admin, pending);

        if remember.is_some() {
            web_sys::console::log_1(&"[Router] Access denied. Redirecting to login.".into());
            self.pending_redirect.set(remember);
        } else if resolved != target || pending.is_some() {
            // 重定向已消费掉记住的目的地
            self.pending_redirect.set(None);
        }

        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 浏览器后退/前进按钮监听。popstate 时同样执行守卫。
    fn init_popstate_listener(&self) {
        let service = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let is_auth = service.is_authenticated.get_untracked();
            let is_admin = service.is_admin.get_untracked();

            let (resolved, remember) =
                resolve_target(target, is_auth, is_admin, None);
            if remember.is_some() {
                service.pending_redirect.set(remember);
            }
            if resolved != target {
                replace_history_state(resolved.to_path());
            }
            service.set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向：
    /// 登录后离开登录页（回到记住的目的地），注销后离开受保护页面。
    fn setup_auth_redirect(&self) {
        let service = *self;

        Effect::new(move |_| {
            let is_auth = service.is_authenticated.get();
            let route = service.current_route.get_untracked();

            if is_auth {
                if route.should_redirect_when_authenticated() {
                    let destination = service
                        .pending_redirect
                        .get_untracked()
                        .unwrap_or_else(AppRoute::auth_success_redirect);
                    service.pending_redirect.set(None);
                    push_history_state(destination.to_path());
                    service.set_route.set(destination);
                    web_sys::console::log_1(
                        &"[Router] Auth state changed: logged in.".into(),
                    );
                }
            } else if route.requires_auth() {
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(redirect.to_path());
                service.set_route.set(redirect);
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged out, redirecting to login.".into(),
                );
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>, is_admin: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated, is_admin);

    // 初始路径也要过守卫（直接在地址栏输入受保护路径的场景）
    router.navigate_to_route(AppRoute::from_path(&current_path()), false);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 管理员状态信号
    is_admin: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated, is_admin);

    children()
}

/// 路由出口组件：根据当前路由渲染对应视图。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_target;
    use super::AppRoute;

    #[test]
    fn unauthenticated_protected_visit_remembers_destination() {
        let (resolved, remember) =
            resolve_target(AppRoute::Ranking, false, false, None);
        assert_eq!(resolved, AppRoute::Login);
        assert_eq!(remember, Some(AppRoute::Ranking));
    }

    #[test]
    fn login_returns_to_remembered_destination() {
        let (resolved, remember) =
            resolve_target(AppRoute::Login, true, false, Some(AppRoute::Profile));
        assert_eq!(resolved, AppRoute::Profile);
        assert_eq!(remember, None);
    }

    #[test]
    fn login_without_pending_lands_on_default() {
        let (resolved, _) = resolve_target(AppRoute::Login, true, false, None);
        assert_eq!(resolved, AppRoute::SendRecognition);
    }

    #[test]
    fn non_admin_is_bounced_off_admin_routes() {
        let (resolved, remember) =
            resolve_target(AppRoute::AdminUsers, true, false, None);
        assert_eq!(resolved, AppRoute::SendRecognition);
        assert_eq!(remember, None);

        let (resolved, _) = resolve_target(AppRoute::AdminUsers, true, true, None);
        assert_eq!(resolved, AppRoute::AdminUsers);
    }

    #[test]
    fn public_routes_pass_through_when_unauthenticated() {
        for route in [AppRoute::Login, AppRoute::Signup, AppRoute::ForgotPassword] {
            let (resolved, remember) = resolve_target(route, false, false, None);
            assert_eq!(resolved, route);
            assert_eq!(remember, None);
        }
    }
}
