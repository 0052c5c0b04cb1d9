use crate::routes::constants::paths;
use leptos::prelude::*;
use leptos_router::components::{Outlet, A};

/// Основной каркас: верхняя панель и содержимое дочернего маршрута
#[component]
pub fn HomeLayout() -> impl IntoView {
    view! {
        <div class="app-layout">
            <header class="top-header">
                <A href=paths::ROOT attr:class="top-header__title">"SAP 發票與物料管理"</A>
                <A href=paths::LOGIN attr:class="top-header__link">"登出"</A>
            </header>
            <main class="app-layout__content">
                <Outlet />
            </main>
        </div>
    }
}
