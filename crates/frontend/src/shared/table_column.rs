//! Настройка колонки таблицы

use contracts::shared::table::{ColumnSortOrder, SortChange, SortDirection};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Selection,
    Index,
    Expand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

impl ColumnAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            ColumnAlign::Left => "left",
            ColumnAlign::Center => "center",
            ColumnAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFixed {
    Left,
    Right,
}

/// Режим сортировки колонки; `Custom`: сортирует backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnSortable {
    #[default]
    No,
    Yes,
    Custom,
}

#[derive(Debug, Clone)]
pub struct TableColumn<T> {
    /// Имя поля строки
    pub prop: Option<String>,
    pub label: String,
    pub width: Option<String>,
    pub min_width: Option<String>,
    pub column_type: Option<ColumnType>,
    pub fixed: Option<ColumnFixed>,
    pub align: Option<ColumnAlign>,
    pub header_align: Option<ColumnAlign>,
    pub sortable: ColumnSortable,
    pub formatter: Option<fn(&T) -> String>,
    pub check_active: bool,
}

impl<T> TableColumn<T> {
    pub fn new(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            prop: Some(prop.into()),
            label: label.into(),
            width: None,
            min_width: None,
            column_type: None,
            fixed: None,
            align: None,
            header_align: None,
            sortable: ColumnSortable::No,
            formatter: None,
            check_active: false,
        }
    }

    pub fn min_width(mut self, min_width: impl Into<String>) -> Self {
        self.min_width = Some(min_width.into());
        self
    }

    pub fn align(mut self, align: ColumnAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn sortable(mut self, sortable: ColumnSortable) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn formatter(mut self, formatter: fn(&T) -> String) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable != ColumnSortable::No
    }

    /// Текст ячейки через formatter; без него пустая строка
    pub fn format(&self, row: &T) -> String {
        self.formatter.map(|f| f(row)).unwrap_or_default()
    }

    /// Текущее направление сортировки колонки
    pub fn sort_direction(&self, sort: &BTreeMap<String, SortDirection>) -> Option<SortDirection> {
        self.prop.as_ref().and_then(|prop| sort.get(prop).copied())
    }

    /// Событие клика по заголовку: нет → по возрастанию → по убыванию → нет
    pub fn next_sort_change(&self, sort: &BTreeMap<String, SortDirection>) -> Option<SortChange> {
        let prop = self.prop.clone()?;
        let order = match self.sort_direction(sort) {
            None => Some(ColumnSortOrder::Ascending),
            Some(SortDirection::Asc) => Some(ColumnSortOrder::Descending),
            Some(SortDirection::Desc) => None,
        };
        Some(SortChange::new(prop, order))
    }

    pub fn sort_indicator(&self, sort: &BTreeMap<String, SortDirection>) -> &'static str {
        match self.sort_direction(sort) {
            Some(SortDirection::Asc) => " ▲",
            Some(SortDirection::Desc) => " ▼",
            None => " ⇅",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Invoice {
        number: String,
    }

    #[test]
    fn test_column_formatter() {
        let column = TableColumn::<Invoice>::new("number", "發票號碼")
            .sortable(ColumnSortable::Custom)
            .formatter(|row| format!("#{}", row.number));

        assert!(column.is_sortable());
        assert_eq!(column.format(&Invoice { number: "AB123".into() }), "#AB123");
        assert!(!TableColumn::<Invoice>::new("number", "發票號碼").is_sortable());
        assert_eq!(TableColumn::<Invoice>::new("n", "N").format(&Invoice { number: "x".into() }), "");
    }

    #[test]
    fn test_sort_cycle() {
        let column = TableColumn::<Invoice>::new("stockQty", "庫存數量").sortable(ColumnSortable::Custom);

        let none = BTreeMap::new();
        assert_eq!(column.sort_indicator(&none), " ⇅");
        assert_eq!(
            column.next_sort_change(&none),
            Some(SortChange::new("stockQty", Some(ColumnSortOrder::Ascending)))
        );

        let asc = BTreeMap::from([("stockQty".to_string(), SortDirection::Asc)]);
        assert_eq!(column.sort_indicator(&asc), " ▲");
        assert_eq!(
            column.next_sort_change(&asc),
            Some(SortChange::new("stockQty", Some(ColumnSortOrder::Descending)))
        );

        let desc = BTreeMap::from([("stockQty".to_string(), SortDirection::Desc)]);
        assert_eq!(column.next_sort_change(&desc), Some(SortChange::new("stockQty", None)));

        // Сортировка по другой колонке не влияет
        let other = BTreeMap::from([("plant".to_string(), SortDirection::Desc)]);
        assert_eq!(column.sort_direction(&other), None);
    }
}
