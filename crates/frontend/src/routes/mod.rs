pub mod constants;
pub mod routes;
