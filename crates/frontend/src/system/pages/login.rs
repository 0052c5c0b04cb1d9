use crate::routes::constants::paths;
use leptos::prelude::*;

/// Переход ко входу через approuter
///
/// Приложение не проверяет учетные данные. Approuter платформы перехватывает
/// запрос без сессии и показывает свою форму входа, поэтому ссылка ведет на
/// главную полной перезагрузкой, мимо клиентского роутера.
#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"SAP 發票與物料管理"</h1>
                <h2>"登入"</h2>
                <p>"帳號驗證由平台登入服務處理。"</p>
                <a href=paths::ROOT rel="external" class="btn-primary">"前往登入"</a>
            </div>
        </div>
    }
}
