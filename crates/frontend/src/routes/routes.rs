use crate::domain::material::ui::list::MaterialList;
use crate::layout::home_layout::HomeLayout;
use crate::system::pages::login::LoginPage;
use crate::system::pages::no_authority::NoAuthorityPage;
use crate::system::pages::not_found::NotFoundPage;
use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <ParentRoute path=path!("/") view=HomeLayout>
                    <Route path=path!("") view=MaterialList />
                </ParentRoute>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/no-authority") view=NoAuthorityPage />
            </Routes>
        </Router>
    }
}
