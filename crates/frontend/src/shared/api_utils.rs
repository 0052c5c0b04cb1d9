//! Адреса и параметры запросов к SAP REST backend

pub struct ApiConfig;

impl ApiConfig {
    /// Dev-сервер проксирует `/api` на backend
    pub const DEV_BASE_URL: &'static str = "/api";
    pub const PROD_BASE_URL: &'static str = "https://sap-pe-poc.cfapps.us10-001.hana.ondemand.com";

    pub const DEFAULT_HEADERS: &'static [(&'static str, &'static str)] =
        &[("Content-Type", "application/json")];

    /// Таймаут запроса, мс
    pub const TIMEOUT_MS: u32 = 30_000;

    /// Базовый URL для запросов к API
    ///
    /// `SAP_API_BASE_URL`, заданный при сборке, имеет приоритет; иначе
    /// debug-сборка идет через dev-прокси, release на боевой хост.
    pub fn base_url() -> &'static str {
        match option_env!("SAP_API_BASE_URL") {
            Some(url) if !url.is_empty() => url,
            _ if cfg!(debug_assertions) => Self::DEV_BASE_URL,
            _ => Self::PROD_BASE_URL,
        }
    }
}

pub mod endpoints {
    pub const MATERIALS: &str = "/sap/materials";
}

/// Полный URL API по пути эндпоинта
///
/// # Пример
/// ```ignore
/// let url = build_api_url(endpoints::MATERIALS);
/// ```
pub fn build_api_url(endpoint: &str) -> String {
    format!("{}{}", ApiConfig::base_url(), endpoint)
}
