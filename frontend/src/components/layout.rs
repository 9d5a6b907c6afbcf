//! Authenticated shell: sidebar navigation around the page content.
//! Admin links only render for admin users; the router still guards the
//! routes themselves.

use crate::components::icons::*;
use crate::session::{logout, use_session};
use crate::use_api;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn NavItem(
    route: AppRoute,
    #[prop(into)] label: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let is_active = move || router.current_route().get() == route;

    view! {
        <li>
            <a
                class=move || if is_active() { "active" } else { "" }
                on:click=move |_| router.navigate_to(route)
            >
                {children()}
                {label}
            </a>
        </li>
    }
}

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let user = session.user_signal();
    let is_admin = session.is_admin_signal();

    let on_logout = move |_| {
        let api = api.clone();
        spawn_local(async move {
            logout(&session, &api, false).await;
        });
    };

    view! {
        <div class="flex min-h-screen bg-base-200">
            <aside class="w-64 bg-base-100 shadow-xl flex flex-col">
                <div class="p-4 flex items-center gap-2 border-b border-base-200">
                    <div class="p-2 bg-primary/10 rounded-xl text-primary">
                        <Sparkles attr:class="h-6 w-6" />
                    </div>
                    <span class="text-lg font-bold">"Kudos"</span>
                </div>

                <ul class="menu p-4 gap-1 flex-1">
                    <NavItem route=AppRoute::SendRecognition label="Send recognition">
                        <Send attr:class="h-4 w-4" />
                    </NavItem>
                    <NavItem route=AppRoute::Ranking label="Ranking">
                        <Trophy attr:class="h-4 w-4" />
                    </NavItem>
                    <NavItem route=AppRoute::Profile label="Profile">
                        <UserRound attr:class="h-4 w-4" />
                    </NavItem>

                    <Show when=move || is_admin.get()>
                        <li class="menu-title mt-4">
                            <span class="flex items-center gap-1">
                                <Shield attr:class="h-3 w-3" />
                                "Admin"
                            </span>
                        </li>
                        <NavItem route=AppRoute::AdminDashboard label="Dashboard">
                            <LayoutDashboard attr:class="h-4 w-4" />
                        </NavItem>
                        <NavItem route=AppRoute::AdminUploadImages label="Upload images">
                            <Upload attr:class="h-4 w-4" />
                        </NavItem>
                        <NavItem route=AppRoute::AdminUsers label="Users">
                            <Users attr:class="h-4 w-4" />
                        </NavItem>
                    </Show>
                </ul>

                <div class="p-4 border-t border-base-200 space-y-2">
                    <div class="text-sm text-base-content/70 truncate">
                        {move || user.get().map(|u| u.name).unwrap_or_default()}
                    </div>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm w-full gap-2">
                        <LogOut attr:class="h-4 w-4" />
                        "Sign out"
                    </button>
                </div>
            </aside>

            <main class="flex-1 p-4 md:p-8 overflow-y-auto">{children()}</main>
        </div>
    }
}
