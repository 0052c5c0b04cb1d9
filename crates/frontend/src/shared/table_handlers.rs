//! Обработчики событий таблицы
//!
//! Переводят события таблицы (выбор строк, сортировка, пагинация, поиск,
//! фильтры) в частичные `TableListReq` для `update_payload` и хранят
//! выбранные строки для подсветки. Одиночный выбор (`selected_row_id`) и
//! множественный (`selected_row_id_list`) независимы друг от друга.

use super::table_column::TableColumn;
use contracts::shared::table::{SortChange, SortDirection, TableListReq};
use leptos::prelude::RwSignal;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// CSS-класс выбранной строки
pub const SELECTED_ROW_CLASS: &str = "is-dismissed";

/// Поле простой сортировки (по дате создания)
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Строка таблицы с уникальным идентификатором
pub trait RowId {
    fn row_id(&self) -> &str;
}

/// `update_payload(partial, update_now)`; `update_now == false`: только
/// подготовить параметры, загрузку данных вызывающий запускает сам
pub type UpdatePayloadFn = Arc<dyn Fn(TableListReq, bool) + Send + Sync>;
pub type RowSelectFn<T> = Arc<dyn Fn(&[T]) + Send + Sync>;
pub type CellClickFn<T> = Arc<dyn Fn(&TableColumn<T>, &T) + Send + Sync>;

pub struct TableHandlersOptions<T> {
    pub update_payload: UpdatePayloadFn,
    pub on_row_select: Option<RowSelectFn<T>>,
    pub on_cell_click: Option<CellClickFn<T>>,
    pub initial_selected_row_id: Option<String>,
    pub initial_selected_row_id_list: Option<Vec<String>>,
}

impl<T> TableHandlersOptions<T> {
    pub fn new(update_payload: impl Fn(TableListReq, bool) + Send + Sync + 'static) -> Self {
        Self {
            update_payload: Arc::new(update_payload),
            on_row_select: None,
            on_cell_click: None,
            initial_selected_row_id: None,
            initial_selected_row_id_list: None,
        }
    }

    pub fn on_row_select(mut self, f: impl Fn(&[T]) + Send + Sync + 'static) -> Self {
        self.on_row_select = Some(Arc::new(f));
        self
    }

    pub fn on_cell_click(mut self, f: impl Fn(&TableColumn<T>, &T) + Send + Sync + 'static) -> Self {
        self.on_cell_click = Some(Arc::new(f));
        self
    }

    pub fn selected_row_id(mut self, id: impl Into<String>) -> Self {
        self.initial_selected_row_id = Some(id.into());
        self
    }

    pub fn selected_row_id_list(mut self, ids: Vec<String>) -> Self {
        self.initial_selected_row_id_list = Some(ids);
        self
    }
}

pub struct TableHandlers<T> {
    update_payload: UpdatePayloadFn,
    on_row_select: Option<RowSelectFn<T>>,
    on_cell_click: Option<CellClickFn<T>>,
    selected_row_id: String,
    selected_row_id_list: Vec<String>,
}

impl<T> fmt::Debug for TableHandlers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableHandlers")
            .field("selected_row_id", &self.selected_row_id)
            .field("selected_row_id_list", &self.selected_row_id_list)
            .finish_non_exhaustive()
    }
}

impl<T: RowId> TableHandlers<T> {
    pub fn new(options: TableHandlersOptions<T>) -> Self {
        Self {
            update_payload: options.update_payload,
            on_row_select: options.on_row_select,
            on_cell_click: options.on_cell_click,
            selected_row_id: options.initial_selected_row_id.unwrap_or_default(),
            selected_row_id_list: options.initial_selected_row_id_list.unwrap_or_default(),
        }
    }

    // ---- выбор строк ----

    pub fn selected_row_id(&self) -> &str {
        &self.selected_row_id
    }

    pub fn selected_row_id_list(&self) -> &[String] {
        &self.selected_row_id_list
    }

    pub fn set_selected_row_id(&mut self, id: impl Into<String>) {
        self.selected_row_id = id.into();
    }

    pub fn set_selected_row_id_list(&mut self, ids: Vec<String>) {
        self.selected_row_id_list = ids;
    }

    /// Класс строки в режиме одиночного выбора
    pub fn row_class_name(&self, row: &T) -> &'static str {
        if row.row_id() == self.selected_row_id {
            SELECTED_ROW_CLASS
        } else {
            ""
        }
    }

    /// Класс строки в режиме множественного выбора
    pub fn row_list_class_name(&self, row: &T) -> &'static str {
        if self.selected_row_id_list.iter().any(|id| id == row.row_id()) {
            SELECTED_ROW_CLASS
        } else {
            ""
        }
    }

    // ---- события таблицы ----

    pub fn handle_select_row(&self, select_list: &[T]) {
        if let Some(on_row_select) = &self.on_row_select {
            on_row_select(select_list);
        }
    }

    pub fn handle_cell_click(&self, column: &TableColumn<T>, row: &T) {
        if let Some(on_cell_click) = &self.on_cell_click {
            on_cell_click(column, row);
        }
    }

    /// Простая сортировка по дате создания; всегда возвращает на первую страницу
    pub fn handle_sort_click(&self, direction: SortDirection) {
        self.dispatch_sort(DEFAULT_SORT_FIELD, direction);
    }

    /// Сортировка по колонке; снятая сортировка означает «по дате создания, по убыванию»
    pub fn handle_column_sort_click(&self, change: &SortChange) {
        match change.order {
            None => self.handle_sort_click(SortDirection::Desc),
            Some(order) => self.dispatch_sort(&change.prop, order.into()),
        }
    }

    pub fn page(&self, page: usize) {
        self.dispatch(TableListReq::default().with_page(page), true);
    }

    /// Смена размера страницы возвращает на первую страницу
    pub fn size(&self, size: usize) {
        self.dispatch(TableListReq::default().with_page(1).with_limit(size), true);
    }

    /// `None` очищает поиск
    pub fn keyword(&self, keyword: Option<&str>) {
        self.dispatch(
            TableListReq::default().with_keyword(keyword.unwrap_or_default()),
            true,
        );
    }

    /// Фильтры только подготавливаются, без немедленной загрузки
    pub fn filter_data(&self, r#where: impl Into<String>) {
        self.dispatch(TableListReq::default().with_where(r#where), false);
    }

    fn dispatch_sort(&self, field: &str, direction: SortDirection) {
        let sort: BTreeMap<&str, SortDirection> = BTreeMap::from([(field, direction)]);
        // Отображение строк в строки сериализуется всегда
        let sort = serde_json::to_string(&sort).unwrap_or_default();
        self.dispatch(TableListReq::default().with_page(1).with_sort(sort), true);
    }

    fn dispatch(&self, partial: TableListReq, update_now: bool) {
        log::debug!("update payload: {:?} (update_now={})", partial, update_now);
        (self.update_payload)(partial, update_now);
    }
}

/// Создает обработчики таблицы в области видимости компонента
///
/// События вызываются через `with`, выбор строк меняется через `update`:
///
/// ```ignore
/// let table = use_table_handlers(TableHandlersOptions::new(update_payload));
/// table.with(|t| t.page(2));
/// table.update(|t| t.set_selected_row_id(row.id.clone()));
/// let class = move || table.with(|t| t.row_class_name(&row));
/// ```
pub fn use_table_handlers<T>(options: TableHandlersOptions<T>) -> RwSignal<TableHandlers<T>>
where
    T: RowId + Send + Sync + 'static,
{
    RwSignal::new(TableHandlers::new(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::table::ColumnSortOrder;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
    }

    impl Row {
        fn new(id: &str) -> Self {
            Self { id: id.to_string() }
        }
    }

    impl RowId for Row {
        fn row_id(&self) -> &str {
            &self.id
        }
    }

    type Calls = Arc<Mutex<Vec<(TableListReq, bool)>>>;

    fn recorded_options() -> (TableHandlersOptions<Row>, Calls) {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let options = TableHandlersOptions::new(move |partial, update_now| {
            sink.lock().unwrap().push((partial, update_now));
        });
        (options, calls)
    }

    fn recorded() -> (TableHandlers<Row>, Calls) {
        let (options, calls) = recorded_options();
        (TableHandlers::new(options), calls)
    }

    fn last(calls: &Calls) -> (TableListReq, bool) {
        calls.lock().unwrap().last().cloned().unwrap()
    }

    #[test]
    fn test_sort_click() {
        let (table, calls) = recorded();
        table.handle_sort_click(SortDirection::Asc);
        assert_eq!(
            last(&calls),
            (
                TableListReq::default()
                    .with_page(1)
                    .with_sort(r#"{"createdAt":"asc"}"#),
                true
            )
        );
    }

    #[test]
    fn test_column_sort_click() {
        let (table, calls) = recorded();

        table.handle_column_sort_click(&SortChange::new("name", Some(ColumnSortOrder::Ascending)));
        assert_eq!(last(&calls).0.sort.as_deref(), Some(r#"{"name":"asc"}"#));
        assert_eq!(last(&calls).0.page, Some(1));

        table.handle_column_sort_click(&SortChange::new("name", Some(ColumnSortOrder::Descending)));
        assert_eq!(last(&calls).0.sort.as_deref(), Some(r#"{"name":"desc"}"#));
    }

    #[test]
    fn test_cleared_column_sort_falls_back_to_default() {
        let (table, calls) = recorded();
        table.handle_column_sort_click(&SortChange::new("name", None));
        table.handle_sort_click(SortDirection::Desc);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[0].0.sort.as_deref(), Some(r#"{"createdAt":"desc"}"#));
    }

    #[test]
    fn test_page_and_size() {
        let (table, calls) = recorded();

        table.page(3);
        assert_eq!(last(&calls), (TableListReq::default().with_page(3), true));

        table.size(25);
        assert_eq!(
            last(&calls),
            (TableListReq::default().with_page(1).with_limit(25), true)
        );
    }

    #[test]
    fn test_keyword() {
        let (table, calls) = recorded();

        table.keyword(None);
        assert_eq!(last(&calls).0, TableListReq::default().with_keyword(""));

        table.keyword(Some("abc"));
        assert_eq!(last(&calls).0, TableListReq::default().with_keyword("abc"));
    }

    #[test]
    fn test_filter_data_is_deferred() {
        let (table, calls) = recorded();
        table.filter_data(r#"{"plant":{"contains":["1000"]}}"#);
        assert_eq!(
            last(&calls),
            (
                TableListReq::default().with_where(r#"{"plant":{"contains":["1000"]}}"#),
                false
            )
        );
    }

    #[test]
    fn test_optional_callbacks() {
        let (table, calls) = recorded();
        table.handle_select_row(&[Row::new("1")]);
        table.handle_cell_click(&TableColumn::new("id", "ID"), &Row::new("1"));
        assert!(calls.lock().unwrap().is_empty());

        let selected: Arc<Mutex<Vec<Row>>> = Arc::new(Mutex::new(Vec::new()));
        let clicked: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let selected_sink = selected.clone();
        let clicked_sink = clicked.clone();
        let (options, _) = recorded_options();
        let table = TableHandlers::new(
            options
                .on_row_select(move |rows: &[Row]| {
                    *selected_sink.lock().unwrap() = rows.to_vec();
                })
                .on_cell_click(move |col: &TableColumn<Row>, row: &Row| {
                    clicked_sink
                        .lock()
                        .unwrap()
                        .push((col.label.clone(), row.id.clone()));
                }),
        );

        table.handle_select_row(&[Row::new("1"), Row::new("2")]);
        table.handle_cell_click(&TableColumn::new("id", "ID"), &Row::new("2"));
        assert_eq!(selected.lock().unwrap().len(), 2);
        assert_eq!(
            clicked.lock().unwrap().as_slice(),
            &[("ID".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_initial_selection() {
        let (options, _) = recorded_options();
        let table = TableHandlers::new(
            options
                .selected_row_id("7")
                .selected_row_id_list(vec!["1".into(), "2".into()]),
        );
        assert_eq!(table.selected_row_id(), "7");
        assert_eq!(table.selected_row_id_list(), &["1".to_string(), "2".to_string()]);

        let (table, _) = recorded();
        assert_eq!(table.selected_row_id(), "");
        assert!(table.selected_row_id_list().is_empty());
    }

    #[test]
    fn test_row_class_name() {
        let (mut table, _) = recorded();
        table.set_selected_row_id("1");

        assert_eq!(table.row_class_name(&Row::new("1")), SELECTED_ROW_CLASS);
        assert_eq!(table.row_class_name(&Row::new("2")), "");
        // режимы независимы
        assert_eq!(table.row_list_class_name(&Row::new("1")), "");
    }

    #[test]
    fn test_row_list_class_name() {
        let (mut table, _) = recorded();
        table.set_selected_row_id_list(vec!["1".into(), "3".into()]);

        assert_eq!(table.row_list_class_name(&Row::new("3")), SELECTED_ROW_CLASS);
        assert_eq!(table.row_list_class_name(&Row::new("2")), "");
        assert_eq!(table.row_class_name(&Row::new("3")), "");
    }
}
