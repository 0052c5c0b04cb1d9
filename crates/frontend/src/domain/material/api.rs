use contracts::domain::material::{MaterialsApiResponse, MaterialsRequest};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;

use crate::shared::api_utils::{build_api_url, endpoints, ApiConfig};

/// Запросить остатки, заказы и поставки по материалам
///
/// Запрос прерывается через `ApiConfig::TIMEOUT_MS`.
pub async fn fetch_materials(req: &MaterialsRequest) -> Result<MaterialsApiResponse, String> {
    let controller = web_sys::AbortController::new()
        .map_err(|e| format!("Failed to create abort controller: {:?}", e))?;
    let signal = controller.signal();
    // Таймер живет до конца функции; drop отменяет его
    let _timeout = Timeout::new(ApiConfig::TIMEOUT_MS, move || controller.abort());

    let mut builder = Request::post(&build_api_url(endpoints::MATERIALS)).abort_signal(Some(&signal));
    for (name, value) in ApiConfig::DEFAULT_HEADERS {
        builder = builder.header(name, value);
    }

    let response = builder
        .json(req)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| {
            if signal.aborted() {
                format!("Request timed out after {} ms", ApiConfig::TIMEOUT_MS)
            } else {
                format!("Request failed: {}", e)
            }
        })?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json::<MaterialsApiResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
