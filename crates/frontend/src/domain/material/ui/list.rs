use crate::domain::material::api::fetch_materials;
use crate::domain::material::rows::{
    build_rows, clamp_page, paginate, parse_list_input, toggle_row_id, total_pages, DetailKind,
    MaterialRow,
};
use crate::shared::app_const::{FORM_BASE_WIDTH, PAGE_SIZE_OPTIONS};
use crate::shared::date_utils::{format_basic_date, today_basic};
use crate::shared::filter_handlers::{use_filter_handlers, FilterHandlersOptions};
use crate::shared::table_column::{ColumnAlign, ColumnSortable, TableColumn};
use crate::shared::table_handlers::{use_table_handlers, TableHandlersOptions};
use contracts::domain::material::{ApiMaterialItem, MaterialsRequest, RowType};
use contracts::shared::filter::FilterDescriptor;
use contracts::shared::table::{SortDirection, TableListReq, DEFAULT_PAYLOAD};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;
use thaw::*;

#[derive(Clone, Debug, Default)]
struct MaterialListState {
    items: Vec<ApiMaterialItem>,
    loaded_at: Option<String>,
}

/// Выбранные строки: количество и сумма остатка
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct SelectionSummary {
    count: usize,
    stock_qty: f64,
}

fn material_label(row: &MaterialRow) -> String {
    match row.item.row_type {
        Some(RowType::Subtotal) => format!("{} 小計", row.item.material),
        Some(RowType::Total) => "總計".to_string(),
        _ => row.item.material.clone(),
    }
}

fn material_columns() -> Vec<TableColumn<MaterialRow>> {
    vec![
        TableColumn::new("material", "物料")
            .min_width("120px")
            .sortable(ColumnSortable::Custom)
            .formatter(material_label),
        TableColumn::new("plant", "工廠")
            .sortable(ColumnSortable::Custom)
            .formatter(|row| row.item.plant.clone()),
        TableColumn::new("storageLocation", "儲存地點")
            .sortable(ColumnSortable::Custom)
            .formatter(|row| row.item.storage_location.clone()),
        TableColumn::new("soCount", "銷售訂單")
            .align(ColumnAlign::Right)
            .sortable(ColumnSortable::Custom)
            .formatter(|row| row.item.so_count.to_string()),
        TableColumn::new("dnCount", "交貨單")
            .align(ColumnAlign::Right)
            .sortable(ColumnSortable::Custom)
            .formatter(|row| row.item.dn_count.to_string()),
        TableColumn::new("stockQty", "庫存數量")
            .align(ColumnAlign::Right)
            .sortable(ColumnSortable::Custom)
            .formatter(|row| format!("{:.3}", row.item.stock_qty)),
    ]
}

/// Сортировка из payload; нечитаемое значение сбрасывает сортировку
fn current_sort(req: &TableListReq) -> BTreeMap<String, SortDirection> {
    req.sort_fields().unwrap_or_else(|e| {
        log::warn!("{:#}", e);
        BTreeMap::new()
    })
}

fn column_style(column: &TableColumn<MaterialRow>) -> String {
    let align = column.align.unwrap_or(ColumnAlign::Left).as_css();
    match &column.min_width {
        Some(min_width) => format!("text-align: {}; min-width: {};", align, min_width),
        None => format!("text-align: {};", align),
    }
}

#[component]
pub fn MaterialList() -> impl IntoView {
    let state = RwSignal::new(MaterialListState::default());
    let payload = RwSignal::new(DEFAULT_PAYLOAD.clone());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let detail = RwSignal::new(Option::<(MaterialRow, DetailKind)>::None);
    let selection = RwSignal::new(SelectionSummary::default());

    // Все события таблицы и фильтров сходятся в одном payload
    let table = use_table_handlers::<MaterialRow>(
        TableHandlersOptions::new(move |partial: TableListReq, _update_now: bool| {
            payload.update(|p| p.merge(partial));
        })
        .on_cell_click(move |column: &TableColumn<MaterialRow>, row: &MaterialRow| {
            if row.is_summary() {
                return;
            }
            if let Some(kind) = column.prop.as_deref().and_then(DetailKind::for_prop) {
                detail.set(Some((row.clone(), kind)));
            }
        })
        .on_row_select(move |rows: &[MaterialRow]| {
            selection.set(SelectionSummary {
                count: rows.len(),
                stock_qty: rows.iter().map(|r| r.item.stock_qty).sum(),
            });
        }),
    );

    let filters = use_filter_handlers(FilterHandlersOptions::new(move |data: &FilterDescriptor| {
        table.with_untracked(|t| t.filter_data(data.to_where_json()));
    }));

    let load_materials = move || {
        let where_json = payload.with_untracked(|p| p.r#where.clone()).unwrap_or_default();
        let filter = if where_json.is_empty() {
            Ok(FilterDescriptor::new())
        } else {
            FilterDescriptor::from_where_json(&where_json)
        };
        let request = match filter {
            Ok(filter) => MaterialsRequest::from_filter(&filter),
            Err(e) => {
                log::error!("{:#}", e);
                set_error.set(Some(format!("{:#}", e)));
                return;
            }
        };

        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);

            match fetch_materials(&request).await {
                Ok(items) => {
                    log::debug!("Loaded {} material rows", items.len());
                    state.update(|s| {
                        s.items = items;
                        s.loaded_at = Some(today_basic());
                    });
                    detail.set(None);
                    table.update(|t| {
                        t.set_selected_row_id(String::new());
                        t.set_selected_row_id_list(Vec::new());
                    });
                    table.with_untracked(|t| {
                        t.handle_select_row(&[]);
                        t.page(1);
                    });
                }
                Err(e) => {
                    log::error!("Failed to load materials: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    let material_input = RwSignal::new(String::new());
    let plant_input = RwSignal::new(String::new());
    let storage_input = RwSignal::new(String::new());
    let keyword_input = RwSignal::new(String::new());

    for (input, key) in [
        (material_input, MaterialsRequest::MATERIAL_KEY),
        (plant_input, MaterialsRequest::PLANT_KEY),
        (storage_input, MaterialsRequest::STORAGE_LOCATION_KEY),
    ] {
        Effect::new(move |_| {
            let values = parse_list_input(&input.get());
            untrack(move || {
                filters.update(|f| f.update_filter_value(key, values));
            });
        });
    }

    Effect::new(move |_| {
        let keyword = keyword_input.get();
        untrack(move || table.with(|t| t.keyword(Some(&keyword))));
    });

    let reset_filters = move || {
        material_input.set(String::new());
        plant_input.set(String::new());
        storage_input.set(String::new());
        filters.update(|f| f.reset_filter());
    };

    let sort = Memo::new(move |_| payload.with(current_sort));
    let visible_rows = Memo::new(move |_| {
        let keyword = payload.with(|p| p.keyword.clone()).unwrap_or_default();
        sort.with(|sort| state.with(|s| build_rows(&s.items, &keyword, sort)))
    });
    let page_rows = Signal::derive(move || {
        payload.with(|p| visible_rows.with(|rows| paginate(rows, p)))
    });
    let current_page = Signal::derive(move || {
        payload.with(|p| visible_rows.with(|rows| clamp_page(rows.len(), p)))
    });
    let page_count = Signal::derive(move || {
        payload.with(|p| visible_rows.with(|rows| total_pages(rows.len(), p))).max(1)
    });

    let toggle_row_selection = move |id: String| {
        table.update(|t| {
            let ids = toggle_row_id(t.selected_row_id_list(), &id);
            t.set_selected_row_id_list(ids);
        });
        table.with_untracked(|t| {
            let selected: Vec<MaterialRow> = visible_rows.with_untracked(|rows| {
                rows.iter()
                    .filter(|row| !t.row_list_class_name(row).is_empty())
                    .cloned()
                    .collect()
            });
            t.handle_select_row(&selected);
        });
    };

    view! {
        <div id="material--list" class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"物料庫存查詢"</h1>
                </div>
                <div class="page__header-right">
                    {move || state.with(|s| s.loaded_at.clone()).map(|d| view! {
                        <span class="page__subtitle">{format!("查詢日期 {}", d)}</span>
                    })}
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label attr:style={format!("width: {};", FORM_BASE_WIDTH)}>"物料"</Label>
                                <Input value=material_input placeholder="M001, M002" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label attr:style={format!("width: {};", FORM_BASE_WIDTH)}>"工廠"</Label>
                                <Input value=plant_input placeholder="1000" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label attr:style={format!("width: {};", FORM_BASE_WIDTH)}>"儲存地點"</Label>
                                <Input value=storage_input placeholder="0001" />
                            </Flex>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| load_materials()
                                disabled=Signal::derive(move || loading.get())
                            >
                                {move || if loading.get() { "查詢中..." } else { "查詢" }}
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| reset_filters()
                            >
                                "重設"
                            </Button>
                        </Flex>
                    </div>
                </div>

                {move || {
                    error.get().map(|err| view! {
                        <div class="alert alert--error">{err}</div>
                    })
                }}

                <div class="table-toolbar">
                    <Input value=keyword_input placeholder="關鍵字" />
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| table.with_untracked(|t| t.handle_sort_click(SortDirection::Desc))
                    >
                        "原始順序"
                    </Button>
                    {move || {
                        let summary = selection.get();
                        (summary.count > 0).then(|| view! {
                            <span class="table-toolbar__selection">
                                {format!("已選 {} 筆，庫存合計 {:.3}", summary.count, summary.stock_qty)}
                            </span>
                        })
                    }}
                    <div class="pagination-controls">
                        <button
                            class="pagination-btn"
                            disabled=move || current_page.get() <= 1
                            on:click=move |_| {
                                let page = current_page.get_untracked();
                                if page > 1 {
                                    table.with_untracked(|t| t.page(page - 1));
                                }
                            }
                        >
                            "‹"
                        </button>
                        <span class="pagination-info">
                            {move || format!("{} / {}", current_page.get(), page_count.get())}
                        </span>
                        <button
                            class="pagination-btn"
                            disabled=move || current_page.get() >= page_count.get()
                            on:click=move |_| {
                                let page = current_page.get_untracked();
                                if page < page_count.get_untracked() {
                                    table.with_untracked(|t| t.page(page + 1));
                                }
                            }
                        >
                            "›"
                        </button>
                        <select
                            class="pagination-size"
                            on:change=move |ev| {
                                if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                                    table.with_untracked(|t| t.size(size));
                                }
                            }
                        >
                            {PAGE_SIZE_OPTIONS
                                .iter()
                                .map(|size| {
                                    let size = *size;
                                    view! {
                                        <option
                                            value=size.to_string()
                                            selected=move || payload.with(|p| p.limit == Some(size))
                                        >
                                            {format!("{} / 頁", size)}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                </div>

                <div class="table-wrapper">
                    <table class="table" style="width: 100%;">
                        <thead>
                            <tr>
                                <th class="table__cell--check"></th>
                                {material_columns()
                                    .into_iter()
                                    .map(|column| {
                                        let style = column_style(&column);
                                        let label = column.label.clone();
                                        if !column.is_sortable() {
                                            return view! { <th style=style>{label}</th> }.into_any();
                                        }
                                        let indicator_column = column.clone();
                                        view! {
                                            <th
                                                class="table__sortable-header"
                                                style={format!("{} cursor: pointer;", style)}
                                                on:click=move |_| {
                                                    let change = sort.with_untracked(|s| column.next_sort_change(s));
                                                    if let Some(change) = change {
                                                        table.with_untracked(|t| t.handle_column_sort_click(&change));
                                                    }
                                                }
                                            >
                                                {label}
                                                <span class="table__sort-indicator">
                                                    {move || sort.with(|s| indicator_column.sort_indicator(s))}
                                                </span>
                                            </th>
                                        }
                                        .into_any()
                                    })
                                    .collect_view()}
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || page_rows.get()
                                key=|row| row.id.clone()
                                children=move |row: MaterialRow| {
                                    let row_for_class = row.clone();
                                    let row_id = row.id.clone();
                                    let check_id = row.id.clone();
                                    let is_summary = row.is_summary();
                                    let type_class = row.row_type_class();
                                    let checked_row = row.clone();
                                    let cells = material_columns()
                                        .into_iter()
                                        .map(|column| {
                                            let style = column_style(&column);
                                            let text = column.format(&row);
                                            let cell_row = row.clone();
                                            view! {
                                                <td
                                                    style=style
                                                    on:click=move |_| {
                                                        table.with_untracked(|t| t.handle_cell_click(&column, &cell_row));
                                                    }
                                                >
                                                    {text}
                                                </td>
                                            }
                                        })
                                        .collect_view();
                                    view! {
                                        <tr
                                            class=move || {
                                                let (selected, checked) = table.with(|t| {
                                                    (t.row_class_name(&row_for_class), t.row_list_class_name(&row_for_class))
                                                });
                                                format!("{} {} {}", type_class, selected, checked).trim().to_string()
                                            }
                                            on:click=move |_| {
                                                if !is_summary {
                                                    let id = row_id.clone();
                                                    table.update(|t| t.set_selected_row_id(id));
                                                }
                                            }
                                        >
                                            <td class="table__cell--check" on:click=|ev| ev.stop_propagation()>
                                                {(!is_summary).then(|| view! {
                                                    <input
                                                        type="checkbox"
                                                        prop:checked=move || {
                                                            table.with(|t| !t.row_list_class_name(&checked_row).is_empty())
                                                        }
                                                        on:change=move |_| toggle_row_selection(check_id.clone())
                                                    />
                                                })}
                                            </td>
                                            {cells}
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>

                {move || detail.get().map(|(row, kind)| {
                    let records = kind.records(&row.item).to_vec();
                    view! {
                        <div class="detail-panel">
                            <div class="detail-panel__header">
                                <h2 class="detail-panel__title">
                                    {format!("{} {} / {} / {}", kind.title(), row.item.material, row.item.plant, row.item.storage_location)}
                                </h2>
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| detail.set(None)
                                >
                                    "關閉"
                                </Button>
                            </div>
                            {if records.is_empty() {
                                view! { <p class="detail-panel__empty">"無明細資料"</p> }.into_any()
                            } else {
                                view! {
                                    <table class="table">
                                        <thead>
                                            <tr>
                                                <th>"單據"</th>
                                                <th>"項次"</th>
                                                <th style="text-align: right;">"數量"</th>
                                                <th>"單位"</th>
                                                <th>"建立日期"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {records
                                                .into_iter()
                                                .map(|record| view! {
                                                    <tr>
                                                        <td>{record.delivery_document.unwrap_or_default()}</td>
                                                        <td>{record.delivery_document_item.unwrap_or_default()}</td>
                                                        <td style="text-align: right;">
                                                            {record.actual_delivery_quantity.unwrap_or_default()}
                                                        </td>
                                                        <td>{record.base_unit.unwrap_or_default()}</td>
                                                        <td>
                                                            {record.creation_date.as_deref().map(format_basic_date).unwrap_or_default()}
                                                        </td>
                                                    </tr>
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                }
                                .into_any()
                            }}
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
