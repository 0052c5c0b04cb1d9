use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Параметры запроса табличного списка
///
/// Единственный канал, через который фильтры и таблица передают намерения
/// слою загрузки данных. Незаполненные поля не сериализуются.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableListReq {
    /// Номер страницы (с 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    /// Размер страницы
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Сортировка: JSON-строка `{"field": "asc" | "desc"}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Условия отбора: JSON-строка FilterDescriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#where: Option<String>,
    /// Строка поиска
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl TableListReq {
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_where(mut self, r#where: impl Into<String>) -> Self {
        self.r#where = Some(r#where.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Накладывает заполненные поля `partial` поверх текущего запроса
    pub fn merge(&mut self, partial: TableListReq) {
        if partial.page.is_some() {
            self.page = partial.page;
        }
        if partial.limit.is_some() {
            self.limit = partial.limit;
        }
        if partial.sort.is_some() {
            self.sort = partial.sort;
        }
        if partial.r#where.is_some() {
            self.r#where = partial.r#where;
        }
        if partial.keyword.is_some() {
            self.keyword = partial.keyword;
        }
    }

    /// Разбирает поле `sort` обратно в отображение поле → направление
    pub fn sort_fields(&self) -> anyhow::Result<BTreeMap<String, SortDirection>> {
        match self.sort.as_deref() {
            None | Some("") => Ok(BTreeMap::new()),
            Some(raw) => serde_json::from_str(raw)
                .with_context(|| format!("invalid sort payload: {}", raw)),
        }
    }
}

/// Запрос по умолчанию: первая страница по 10 записей
pub const DEFAULT_PAYLOAD: TableListReq = TableListReq {
    page: Some(1),
    limit: Some(10),
    sort: None,
    r#where: None,
    keyword: None,
};

/// Информация о постраничной выдаче
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pager {
    pub total_count: usize,
    pub limit: usize,
    pub page: usize,
}

pub const DEFAULT_PAGER: Pager = Pager {
    page: 0,
    limit: 0,
    total_count: 0,
};

impl Pager {
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.limit)
    }
}

/// Направление сортировки в формате backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Направление сортировки, приходящее от заголовка колонки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSortOrder {
    Ascending,
    Descending,
}

impl From<ColumnSortOrder> for SortDirection {
    fn from(order: ColumnSortOrder) -> Self {
        match order {
            ColumnSortOrder::Ascending => SortDirection::Asc,
            ColumnSortOrder::Descending => SortDirection::Desc,
        }
    }
}

/// Событие смены сортировки колонки; `order == None` значит сортировка снята
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortChange {
    pub prop: String,
    pub order: Option<ColumnSortOrder>,
}

impl SortChange {
    pub fn new(prop: impl Into<String>, order: Option<ColumnSortOrder>) -> Self {
        Self {
            prop: prop.into(),
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_omitted() {
        let req = TableListReq::default().with_page(1).with_limit(25);
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"page":1,"limit":25}"#
        );
    }

    #[test]
    fn test_where_field_name() {
        let req = TableListReq::default().with_where("{}");
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"where":"{}"}"#);
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let mut staged = DEFAULT_PAYLOAD.clone().with_keyword("abc");
        staged.merge(TableListReq::default().with_page(3));
        assert_eq!(staged.page, Some(3));
        assert_eq!(staged.limit, Some(10));
        assert_eq!(staged.keyword.as_deref(), Some("abc"));

        staged.merge(TableListReq::default().with_keyword(""));
        assert_eq!(staged.keyword.as_deref(), Some(""));
    }

    #[test]
    fn test_sort_fields() {
        let req = TableListReq::default().with_sort(r#"{"name":"asc"}"#);
        let fields = req.sort_fields().unwrap();
        assert_eq!(fields.get("name"), Some(&SortDirection::Asc));

        assert!(TableListReq::default().sort_fields().unwrap().is_empty());
        assert!(TableListReq::default()
            .with_sort("not json")
            .sort_fields()
            .is_err());
    }

    #[test]
    fn test_column_order_mapping() {
        assert_eq!(SortDirection::from(ColumnSortOrder::Ascending), SortDirection::Asc);
        assert_eq!(SortDirection::from(ColumnSortOrder::Descending), SortDirection::Desc);
    }

    #[test]
    fn test_pager_total_pages() {
        assert_eq!(DEFAULT_PAGER.total_pages(), 0);
        let pager = Pager {
            total_count: 21,
            limit: 10,
            page: 1,
        };
        assert_eq!(pager.total_pages(), 3);
    }
}
