//! Kudos 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话状态管理
//! - `api`: HTTP 客户端与各领域服务
//! - `pages` / `components`: UI 层

mod api;
mod components;
mod config;
mod hooks;
mod pages;
mod session;
mod web;

use crate::api::ApiClient;
use crate::components::layout::AppShell;
use crate::pages::admin_dashboard::AdminDashboardPage;
use crate::pages::forgot_password::ForgotPasswordPage;
use crate::pages::login::LoginPage;
use crate::pages::profile::ProfilePage;
use crate::pages::ranking::RankingPage;
use crate::pages::send_recognition::SendRecognitionPage;
use crate::pages::signup::SignupPage;
use crate::pages::upload_images::UploadImagesPage;
use crate::pages::users_dashboard::UsersDashboardPage;
use crate::session::{SessionContext, init_session};
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

use leptos::prelude::*;

/// 从 Context 获取共享的 HTTP 客户端
pub(crate) fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient should be provided")
}

/// 路由匹配函数
///
/// 公开页面直接渲染；受保护页面包在带侧边栏的 AppShell 里。
/// 访问控制本身由路由服务完成，这里只负责视图。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::SendRecognition => view! {
            <AppShell>
                <SendRecognitionPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::Ranking => view! {
            <AppShell>
                <RankingPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::Profile => view! {
            <AppShell>
                <ProfilePage />
            </AppShell>
        }
        .into_any(),
        AppRoute::AdminDashboard => view! {
            <AppShell>
                <AdminDashboardPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::AdminUploadImages => view! {
            <AppShell>
                <UploadImagesPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::AdminUsers => view! {
            <AppShell>
                <UsersDashboardPage />
            </AppShell>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建 HTTP 客户端并放入 Context，供所有页面共享
    let api = ApiClient::new(config::api_base_url());
    provide_context(api.clone());

    // 2. 创建会话上下文
    let session = SessionContext::new();
    provide_context(session);

    // 3. 初始化会话（从 LocalStorage 恢复 + 订阅失效事件）
    init_session(&session, &api);

    // 4. 获取认证/权限信号，注入路由服务（解耦！）
    let is_authenticated = session.is_authenticated_signal();
    let is_admin = session.is_admin_signal();

    view! {
        <Router is_authenticated=is_authenticated is_admin=is_admin>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
