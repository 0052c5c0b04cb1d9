pub mod filter;
pub mod filter_fields;
pub mod options;
pub mod table;
