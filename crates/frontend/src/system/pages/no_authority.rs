use crate::routes::constants::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NoAuthorityPage() -> impl IntoView {
    view! {
        <div class="error-page">
            <h1>"403"</h1>
            <p>"沒有權限瀏覽此頁面"</p>
            <A href=paths::LOGIN>"重新登入"</A>
        </div>
    }
}
