use crate::routes::constants::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="error-page">
            <h1>"404"</h1>
            <p>"找不到頁面"</p>
            <A href=paths::ROOT>"返回首頁"</A>
        </div>
    }
}
