//! Состояние панели фильтров
//!
//! Хранит набор условий отбора (`FilterDescriptor`) и после каждого
//! изменения синхронно вызывает `on_filter_change` с полным набором.
//!
//! # Использование
//!
//! ```ignore
//! let filters = use_filter_handlers(FilterHandlersOptions::new(move |data| {
//!     table.with(|t| t.filter_data(data.to_where_json()));
//! }));
//!
//! filters.update(|f| f.update_filter_value("plant", "1000"));
//! ```

use contracts::shared::filter::{FilterDescriptor, PredicateKind};
use leptos::prelude::RwSignal;
use std::fmt;
use std::sync::Arc;

pub type FilterChangeFn = Arc<dyn Fn(&FilterDescriptor) + Send + Sync>;

/// Сырое значение из виджета фильтра: одна строка или список
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Single(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Single(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::Many(values)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        FilterValue::Many(values.into_iter().map(String::from).collect())
    }
}

/// Приводит значение фильтра к списку строк
///
/// Список возвращается как есть, непустая строка оборачивается в список
/// из одного элемента, пустое или отсутствующее значение заменяется на
/// `fallback` (пустой список, если `fallback` не задан).
pub fn normalize_filter_value(value: Option<FilterValue>, fallback: Option<Vec<String>>) -> Vec<String> {
    match value {
        Some(FilterValue::Many(values)) => values,
        Some(FilterValue::Single(value)) if !value.is_empty() => vec![value],
        _ => fallback.unwrap_or_default(),
    }
}

pub struct FilterHandlersOptions {
    pub on_filter_change: FilterChangeFn,
}

impl FilterHandlersOptions {
    pub fn new(on_filter_change: impl Fn(&FilterDescriptor) + Send + Sync + 'static) -> Self {
        Self {
            on_filter_change: Arc::new(on_filter_change),
        }
    }
}

#[derive(Clone)]
pub struct FilterHandlers {
    filter_data: FilterDescriptor,
    on_filter_change: FilterChangeFn,
}

impl fmt::Debug for FilterHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterHandlers")
            .field("filter_data", &self.filter_data)
            .finish_non_exhaustive()
    }
}

impl FilterHandlers {
    pub fn new(options: FilterHandlersOptions) -> Self {
        Self {
            filter_data: FilterDescriptor::new(),
            on_filter_change: options.on_filter_change,
        }
    }

    pub fn filter_data(&self) -> &FilterDescriptor {
        &self.filter_data
    }

    /// Обновляет значение фильтра; пустое значение снимает условие
    pub fn update_filter_value(&mut self, key: &str, value: impl Into<FilterValue>) {
        let values = normalize_filter_value(Some(value.into()), None);
        if values.is_empty() {
            self.filter_data.unset(key);
        } else {
            let predicate = PredicateKind::for_key(key).build(values);
            self.filter_data.set(key, predicate);
        }
        self.notify();
    }

    /// Снимает все условия
    pub fn reset_filter(&mut self) {
        self.filter_data.clear();
        self.notify();
    }

    // Уведомление без проверки изменений: подписчик получает каждый вызов
    fn notify(&self) {
        log::debug!("filter changed: {}", self.filter_data.to_where_json());
        (self.on_filter_change)(&self.filter_data);
    }
}

/// Создает состояние фильтров в области видимости компонента
pub fn use_filter_handlers(options: FilterHandlersOptions) -> RwSignal<FilterHandlers> {
    RwSignal::new(FilterHandlers::new(options))
}
