//! Форматирование дат
//!
//! Во всем интерфейсе даты выводятся как YYYY/MM/DD

use super::app_const::BASIC_DATE_FORMAT;
use chrono::{DateTime, NaiveDate, Utc};

/// Дата или дата-время ISO в формате YYYY/MM/DD
/// Пример: "2024-03-15" или "2024-03-15T14:02:26Z" -> "2024/03/15"
/// Компактные даты SAP ("20240315") тоже принимаются.
pub fn format_basic_date(date_str: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return dt.format(BASIC_DATE_FORMAT).to_string();
    }
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y%m%d"))
        .map(|d| d.format(BASIC_DATE_FORMAT).to_string())
        .unwrap_or_else(|_| date_str.to_string())
}

/// Сегодняшняя дата в формате YYYY/MM/DD
pub fn today_basic() -> String {
    Utc::now().date_naive().format(BASIC_DATE_FORMAT).to_string()
}
