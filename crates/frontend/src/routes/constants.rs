//! Пути маршрутов приложения

pub mod paths {
    pub const ROOT: &str = "/";
    pub const LOGIN: &str = "/login";
    /// Любой путь, не совпавший с остальными маршрутами
    pub const NOT_FOUND: &str = "/*any";
    pub const NO_AUTHORITY: &str = "/no-authority";
}
