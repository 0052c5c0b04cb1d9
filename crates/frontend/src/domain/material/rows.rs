//! Строки таблицы материалов: поиск, сортировка, группировка с итогами,
//! постраничный срез

use crate::shared::table_handlers::RowId;
use contracts::domain::material::{ApiMaterialItem, DetailRecord, MaterialItem, RowType};
use contracts::shared::table::{SortDirection, TableListReq};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRow {
    pub id: String,
    pub item: MaterialItem,
}

impl RowId for MaterialRow {
    fn row_id(&self) -> &str {
        &self.id
    }
}

impl MaterialRow {
    pub fn is_summary(&self) -> bool {
        matches!(
            self.item.row_type,
            Some(RowType::Subtotal) | Some(RowType::Total)
        )
    }

    pub fn row_type_class(&self) -> &'static str {
        match self.item.row_type {
            Some(RowType::Subtotal) => "row--subtotal",
            Some(RowType::Total) => "row--total",
            _ => "",
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    so_count: i64,
    dn_count: i64,
    stock_qty: f64,
}

impl Totals {
    fn add(&mut self, item: &ApiMaterialItem) {
        self.so_count += item.so_count;
        self.dn_count += item.dn_count;
        self.stock_qty += item.stock_qty;
    }

    fn into_row(self, id: String, material: String, row_type: RowType) -> MaterialRow {
        MaterialRow {
            id,
            item: MaterialItem {
                material,
                plant: String::new(),
                storage_location: String::new(),
                so_count: self.so_count,
                dn_count: self.dn_count,
                stock_qty: self.stock_qty,
                so_details: Vec::new(),
                dn_details: Vec::new(),
                stock_details: Vec::new(),
                row_type: Some(row_type),
            },
        }
    }
}

/// Раскладывает ответ API в строки таблицы
///
/// После каждой серии подряд идущих строк одного материала добавляется
/// промежуточный итог, в конце общий итог. Порядок строк ответа сохраняется.
/// Идентификатор строки данных не зависит от ее позиции, поэтому выбор
/// переживает поиск и сортировку.
pub fn group_with_subtotals(items: Vec<ApiMaterialItem>) -> Vec<MaterialRow> {
    let mut rows = Vec::with_capacity(items.len() * 2 + 1);
    if items.is_empty() {
        return rows;
    }

    let mut total = Totals::default();
    let mut group = Totals::default();
    let mut group_material: Option<String> = None;
    let mut group_index = 0usize;
    let mut occurrences: HashMap<String, usize> = HashMap::new();

    for item in items {
        if let Some(material) = group_material.as_ref() {
            if *material != item.material {
                let id = format!("subtotal:{}:{}", group_index, material);
                rows.push(group.into_row(id, material.clone(), RowType::Subtotal));
                group = Totals::default();
                group_index += 1;
            }
        }
        group_material = Some(item.material.clone());
        group.add(&item);
        total.add(&item);

        let key = format!("{}:{}:{}", item.material, item.plant, item.storage_location);
        let occurrence = occurrences.entry(key.clone()).or_insert(0);
        let id = format!("{}:{}", key, occurrence);
        *occurrence += 1;
        rows.push(MaterialRow {
            id,
            item: MaterialItem::from(item),
        });
    }

    if let Some(material) = group_material {
        let id = format!("subtotal:{}:{}", group_index, material);
        rows.push(group.into_row(id, material, RowType::Subtotal));
    }
    rows.push(total.into_row("total".to_string(), String::new(), RowType::Total));
    rows
}

/// Отбор позиций по ключевому слову (материал, завод, склад), без учета регистра
///
/// Пустое слово не фильтрует.
pub fn filter_items_by_keyword(items: &[ApiMaterialItem], keyword: &str) -> Vec<ApiMaterialItem> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            [&item.material, &item.plant, &item.storage_location]
                .iter()
                .any(|v| v.to_lowercase().contains(&keyword))
        })
        .cloned()
        .collect()
}

/// Поля, по которым таблица материалов сортируется на клиенте
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSortField {
    Material,
    Plant,
    StorageLocation,
    SoCount,
    DnCount,
    StockQty,
}

impl MaterialSortField {
    /// Поле по `prop` колонки; прочие поля (например `createdAt`) не сортируются
    pub fn from_prop(prop: &str) -> Option<Self> {
        match prop {
            "material" => Some(Self::Material),
            "plant" => Some(Self::Plant),
            "storageLocation" => Some(Self::StorageLocation),
            "soCount" => Some(Self::SoCount),
            "dnCount" => Some(Self::DnCount),
            "stockQty" => Some(Self::StockQty),
            _ => None,
        }
    }

    fn compare(&self, a: &ApiMaterialItem, b: &ApiMaterialItem) -> Ordering {
        match self {
            Self::Material => a.material.cmp(&b.material),
            Self::Plant => a.plant.cmp(&b.plant),
            Self::StorageLocation => a.storage_location.cmp(&b.storage_location),
            Self::SoCount => a.so_count.cmp(&b.so_count),
            Self::DnCount => a.dn_count.cmp(&b.dn_count),
            Self::StockQty => a.stock_qty.total_cmp(&b.stock_qty),
        }
    }
}

/// Сортирует позиции по первому полю из `sort`
///
/// Кроме сортировки по материалу, позиции сортируются внутри своего
/// материала, а материалы остаются в порядке ответа. Так промежуточные
/// итоги по-прежнему соответствуют группам.
pub fn sort_items(items: &mut [ApiMaterialItem], sort: &BTreeMap<String, SortDirection>) {
    let Some((field, direction)) = sort
        .iter()
        .find_map(|(prop, dir)| MaterialSortField::from_prop(prop).map(|f| (f, *dir)))
    else {
        return;
    };

    let mut rank: HashMap<String, usize> = HashMap::new();
    for item in items.iter() {
        let next = rank.len();
        rank.entry(item.material.clone()).or_insert(next);
    }

    items.sort_by(|a, b| {
        let ordering = match direction {
            SortDirection::Asc => field.compare(a, b),
            SortDirection::Desc => field.compare(a, b).reverse(),
        };
        if field == MaterialSortField::Material {
            ordering
        } else {
            rank.get(&a.material)
                .cmp(&rank.get(&b.material))
                .then(ordering)
        }
    });
}

/// Строки таблицы для текущего поиска и сортировки
///
/// Итоги пересчитываются по отобранным позициям.
pub fn build_rows(
    items: &[ApiMaterialItem],
    keyword: &str,
    sort: &BTreeMap<String, SortDirection>,
) -> Vec<MaterialRow> {
    let mut visible = filter_items_by_keyword(items, keyword);
    sort_items(&mut visible, sort);
    group_with_subtotals(visible)
}

pub fn total_pages(row_count: usize, req: &TableListReq) -> usize {
    match req.limit {
        Some(limit) if limit > 0 => row_count.div_ceil(limit),
        _ => 1,
    }
}

/// Номер страницы запроса, приведенный к диапазону `1..=total_pages`
pub fn clamp_page(row_count: usize, req: &TableListReq) -> usize {
    let last = total_pages(row_count, req).max(1);
    req.page.unwrap_or(1).clamp(1, last)
}

/// Страница строк по `page` (с 1) и `limit` запроса
///
/// Номер за последней страницей дает последнюю страницу.
pub fn paginate(rows: &[MaterialRow], req: &TableListReq) -> Vec<MaterialRow> {
    let limit = req.limit.unwrap_or(rows.len()).max(1);
    let page = clamp_page(rows.len(), req);
    rows.iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .cloned()
        .collect()
}

/// Детализация, которую открывает клик по ячейке количества
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    SalesOrder,
    Delivery,
    Stock,
}

impl DetailKind {
    pub fn for_prop(prop: &str) -> Option<Self> {
        match prop {
            "soCount" => Some(Self::SalesOrder),
            "dnCount" => Some(Self::Delivery),
            "stockQty" => Some(Self::Stock),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::SalesOrder => "銷售訂單明細",
            Self::Delivery => "交貨單明細",
            Self::Stock => "庫存明細",
        }
    }

    pub fn records<'a>(&self, item: &'a MaterialItem) -> &'a [DetailRecord] {
        match self {
            Self::SalesOrder => &item.so_details,
            Self::Delivery => &item.dn_details,
            Self::Stock => &item.stock_details,
        }
    }
}

/// Переключает `id` в списке выбранных строк
pub fn toggle_row_id(ids: &[String], id: &str) -> Vec<String> {
    if ids.iter().any(|i| i == id) {
        ids.iter().filter(|i| *i != id).cloned().collect()
    } else {
        let mut ids = ids.to_vec();
        ids.push(id.to_string());
        ids
    }
}

/// Разбирает ввод поля фильтра: значения через запятую, пробел или перевод строки
pub fn parse_list_input(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(material: &str, plant: &str, so: i64, dn: i64, qty: f64) -> ApiMaterialItem {
        ApiMaterialItem {
            material: material.to_string(),
            plant: plant.to_string(),
            storage_location: "0001".to_string(),
            so_count: so,
            dn_count: dn,
            stock_qty: qty,
            ..Default::default()
        }
    }

    #[test]
    fn test_group_empty() {
        assert!(group_with_subtotals(Vec::new()).is_empty());
    }

    #[test]
    fn test_group_with_subtotals() {
        let rows = group_with_subtotals(vec![
            item("M1", "1000", 1, 2, 10.0),
            item("M1", "2000", 3, 0, 5.5),
            item("M2", "1000", 0, 1, 1.0),
        ]);

        let types: Vec<_> = rows.iter().map(|r| r.item.row_type).collect();
        assert_eq!(
            types,
            vec![
                Some(RowType::Data),
                Some(RowType::Data),
                Some(RowType::Subtotal),
                Some(RowType::Data),
                Some(RowType::Subtotal),
                Some(RowType::Total),
            ]
        );

        let m1 = &rows[2].item;
        assert_eq!(m1.material, "M1");
        assert_eq!((m1.so_count, m1.dn_count, m1.stock_qty), (4, 2, 15.5));

        let total = &rows[5].item;
        assert_eq!((total.so_count, total.dn_count, total.stock_qty), (4, 3, 16.5));
    }

    #[test]
    fn test_row_ids_are_unique() {
        let rows = group_with_subtotals(vec![
            item("M1", "1000", 1, 0, 1.0),
            item("M1", "1000", 1, 0, 1.0),
            item("M2", "1000", 1, 0, 1.0),
            item("M1", "1000", 1, 0, 1.0),
        ]);
        let mut ids: Vec<_> = rows.iter().map(|r| r.id.clone()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_keyword_recomputes_totals() {
        let items = vec![item("M1", "1000", 2, 0, 10.0), item("X9", "2000", 1, 1, 1.0)];
        let rows = build_rows(&items, "x9", &BTreeMap::new());

        let types: Vec<_> = rows.iter().map(|r| r.item.row_type).collect();
        assert_eq!(
            types,
            vec![Some(RowType::Data), Some(RowType::Subtotal), Some(RowType::Total)]
        );
        assert_eq!(rows[1].item.material, "X9");
        let total = &rows[2].item;
        assert_eq!((total.so_count, total.dn_count, total.stock_qty), (1, 1, 1.0));

        assert!(build_rows(&items, "nothing", &BTreeMap::new()).is_empty());
        assert_eq!(build_rows(&items, "  ", &BTreeMap::new()).len(), 5);
    }

    #[test]
    fn test_row_ids_survive_keyword() {
        let items = vec![item("M1", "1000", 1, 0, 1.0), item("X9", "2000", 1, 0, 1.0)];
        let all = build_rows(&items, "", &BTreeMap::new());
        let filtered = build_rows(&items, "x9", &BTreeMap::new());
        assert_eq!(filtered[0].id, all[2].id);
    }

    #[test]
    fn test_sort_within_material_groups() {
        let mut items = vec![
            item("M2", "1000", 0, 0, 1.0),
            item("M1", "1000", 0, 0, 5.0),
            item("M2", "2000", 0, 0, 3.0),
            item("M1", "2000", 0, 0, 2.0),
        ];
        let sort = BTreeMap::from([("stockQty".to_string(), SortDirection::Desc)]);
        sort_items(&mut items, &sort);
        let order: Vec<_> = items.iter().map(|i| (i.material.as_str(), i.stock_qty)).collect();
        assert_eq!(order, vec![("M2", 3.0), ("M2", 1.0), ("M1", 5.0), ("M1", 2.0)]);

        let sort = BTreeMap::from([("material".to_string(), SortDirection::Asc)]);
        sort_items(&mut items, &sort);
        let order: Vec<_> = items.iter().map(|i| (i.material.as_str(), i.stock_qty)).collect();
        assert_eq!(order, vec![("M1", 5.0), ("M1", 2.0), ("M2", 3.0), ("M2", 1.0)]);
    }

    #[test]
    fn test_unknown_sort_field_keeps_order() {
        let mut items = vec![item("M2", "1000", 0, 0, 1.0), item("M1", "1000", 0, 0, 2.0)];
        let sort = BTreeMap::from([("createdAt".to_string(), SortDirection::Desc)]);
        sort_items(&mut items, &sort);
        assert_eq!(items[0].material, "M2");
    }

    #[test]
    fn test_paginate() {
        let rows = group_with_subtotals((0..7).map(|i| item(&format!("M{}", i), "1000", 1, 0, 1.0)).collect());
        // 7 строк данных + 7 промежуточных + общий итог
        assert_eq!(rows.len(), 15);

        let req = TableListReq::default().with_page(2).with_limit(10);
        let page = paginate(&rows, &req);
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].id, rows[10].id);
        assert_eq!(total_pages(rows.len(), &req), 2);

        assert_eq!(paginate(&rows, &TableListReq::default()).len(), 15);
    }

    #[test]
    fn test_page_past_the_end_is_clamped() {
        let rows = group_with_subtotals((0..2).map(|i| item(&format!("M{}", i), "1000", 1, 0, 1.0)).collect());
        // 5 строк, по 10 на страницу
        let req = TableListReq::default().with_page(3).with_limit(10);
        assert_eq!(clamp_page(rows.len(), &req), 1);
        assert_eq!(paginate(&rows, &req).len(), 5);

        let huge = TableListReq::default().with_page(usize::MAX).with_limit(usize::MAX);
        assert_eq!(paginate(&rows, &huge).len(), 5);
        assert_eq!(clamp_page(0, &TableListReq::default().with_page(0)), 1);
    }

    #[test]
    fn test_detail_kind() {
        let mut data = MaterialItem::from(item("M1", "1000", 1, 0, 1.0));
        data.dn_details.push(DetailRecord {
            delivery_document: Some("80000001".to_string()),
            ..Default::default()
        });
        assert_eq!(DetailKind::for_prop("dnCount"), Some(DetailKind::Delivery));
        assert_eq!(DetailKind::for_prop("plant"), None);
        assert_eq!(DetailKind::Delivery.records(&data).len(), 1);
        assert!(DetailKind::SalesOrder.records(&data).is_empty());
    }

    #[test]
    fn test_toggle_row_id() {
        let ids = toggle_row_id(&[], "a");
        assert_eq!(ids, vec!["a"]);
        let ids = toggle_row_id(&ids, "b");
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(toggle_row_id(&ids, "a"), vec!["b"]);
    }

    #[test]
    fn test_parse_list_input() {
        assert_eq!(parse_list_input("M1, M2\nM3  "), vec!["M1", "M2", "M3"]);
        assert!(parse_list_input(" , ").is_empty());
    }
}
