/// Допустимые расширения при загрузке Excel
pub const UPLOAD_ACCEPT_LIST: &str = ".xlsx,.xls,.xlsm,.xlsb,.xltx,.xltm,.xlt,.xlam,.xla,.xlw,.xlr";

/// Ширина подписи поля формы
pub const FORM_BASE_WIDTH: &str = "100px";

/// Формат даты для отображения (YYYY/MM/DD)
pub const BASIC_DATE_FORMAT: &str = "%Y/%m/%d";

/// Варианты размера страницы таблицы
pub const PAGE_SIZE_OPTIONS: &[usize] = &[10, 20, 50, 100];
