//! Классы полей фильтра: определяют, какой виджет ввода рисует панель фильтров

pub const BASE_FILTER_IN: &[&str] = &["id", "company"];
pub const BUSINESS_PARTNER_IN: &[&str] = &[
    "businessPlace",
    "isNaturalPerson",
    "isSupplier",
    "isCustomer",
    "invoiceMergeFlag",
    "bpNo",
];
pub const TAX_CODE_IN: &[&str] = &[
    "taxCode",
    "inOutTaxCategory",
    "taxType",
    "deductionCode",
    "invoiceType",
];
pub const GROUP_IN: &[&str] = &["guiGroup.guiGroupCode", "businessPlace.company"];
pub const YES_NO_IN: &[&str] = &[
    "isEInvoice",
    "isNaturalPerson",
    "isSupplier",
    "isCustomer",
    "invoiceMergeFlag",
    "active",
];
pub const USER_IN: &[&str] = &["email", "isActive"];
pub const TAX_DETAIL_IN: &[&str] = &[
    "companyId",
    "businessPlaceId",
    "accountingDocYear",
    "companyCodeCurrency",
    "transactionCurrency",
];
pub const INVOICE_ISSUE_IN: &[&str] = &["guiStatus"];

/// Все группы полей с выбором из списка
pub const IN_ITEM_GROUPS: &[&[&str]] = &[
    BASE_FILTER_IN,
    BUSINESS_PARTNER_IN,
    TAX_CODE_IN,
    GROUP_IN,
    YES_NO_IN,
    USER_IN,
    TAX_DETAIL_IN,
    INVOICE_ISSUE_IN,
];

pub const DATE_ITEM: &[&str] = &["guiDate", "customsDeclarationDate"];
pub const DATE_RANGE_ITEM: &[&str] = &["lastInvoiceDate", "voidedTime", "postingDate"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFieldKind {
    /// Выбор одного или нескольких значений из списка
    InList,
    /// Одна дата
    Date,
    /// Период дат
    DateRange,
    /// Свободный текст
    Text,
}

impl FilterFieldKind {
    pub fn for_key(key: &str) -> Self {
        if IN_ITEM_GROUPS.iter().any(|group| group.contains(&key)) {
            FilterFieldKind::InList
        } else if DATE_ITEM.contains(&key) {
            FilterFieldKind::Date
        } else if DATE_RANGE_ITEM.contains(&key) {
            FilterFieldKind::DateRange
        } else {
            FilterFieldKind::Text
        }
    }
}

/// Все ключи полей с выбором из списка, без повторов, в порядке групп
pub fn in_item_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = Vec::new();
    for key in IN_ITEM_GROUPS.iter().flat_map(|group| group.iter()) {
        if !keys.contains(key) {
            keys.push(*key);
        }
    }
    keys
}
