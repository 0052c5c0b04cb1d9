pub mod login;
pub mod no_authority;
pub mod not_found;
