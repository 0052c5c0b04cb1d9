pub mod api_utils;
pub mod app_const;
pub mod date_utils;
pub mod filter_handlers;
pub mod table_column;
pub mod table_handlers;
