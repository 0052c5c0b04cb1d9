use crate::shared::filter::FilterDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Детальная запись SAP (заказ, поставка или остаток)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_document_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivered_qty_in_base_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivery_quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_document_item_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods_movement_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods_movement_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_related_billing_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_gross_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_net_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_weight_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profitability_segment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_center: Option<String>,
    /// Прочие поля SAP, не описанные явно
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Тело запроса POST /sap/materials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsRequest {
    pub materials: Vec<String>,
    pub plants: Vec<String>,
    pub storage_location: Vec<String>,
}

impl MaterialsRequest {
    pub const MATERIAL_KEY: &'static str = "material";
    pub const PLANT_KEY: &'static str = "plant";
    pub const STORAGE_LOCATION_KEY: &'static str = "storageLocation";

    /// Собирает запрос из значений активных фильтров
    pub fn from_filter(filter: &FilterDescriptor) -> Self {
        let values = |key: &str| {
            filter
                .get(key)
                .map(|p| p.values().to_vec())
                .unwrap_or_default()
        };
        Self {
            materials: values(Self::MATERIAL_KEY),
            plants: values(Self::PLANT_KEY),
            storage_location: values(Self::STORAGE_LOCATION_KEY),
        }
    }
}

/// Элемент ответа API материалов
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMaterialItem {
    pub material: String,
    pub plant: String,
    pub storage_location: String,
    pub so_count: i64,
    pub dn_count: i64,
    pub stock_qty: f64,
    #[serde(default)]
    pub so_details: Vec<DetailRecord>,
    #[serde(default)]
    pub dn_details: Vec<DetailRecord>,
    #[serde(default)]
    pub stock_details: Vec<DetailRecord>,
}

pub type MaterialsApiResponse = Vec<ApiMaterialItem>;

/// Тип строки при групповом выводе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    Data,
    Subtotal,
    Total,
}

/// Строка таблицы материалов (данные, промежуточный или общий итог)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialItem {
    pub material: String,
    pub plant: String,
    pub storage_location: String,
    pub so_count: i64,
    pub dn_count: i64,
    pub stock_qty: f64,
    #[serde(default)]
    pub so_details: Vec<DetailRecord>,
    #[serde(default)]
    pub dn_details: Vec<DetailRecord>,
    #[serde(default)]
    pub stock_details: Vec<DetailRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_type: Option<RowType>,
}

impl From<ApiMaterialItem> for MaterialItem {
    fn from(item: ApiMaterialItem) -> Self {
        Self {
            material: item.material,
            plant: item.plant,
            storage_location: item.storage_location,
            so_count: item.so_count,
            dn_count: item.dn_count,
            stock_qty: item.stock_qty,
            so_details: item.so_details,
            dn_details: item.dn_details,
            stock_details: item.stock_details,
            row_type: Some(RowType::Data),
        }
    }
}
