use serde::{Deserialize, Serialize};

/// Вариант выбора для select / radio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Режимы выгрузки XML счёта
pub fn upload_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("下載XML", "downloadXML"),
        SelectOption::new("下載+上傳", "downloadAndUpload"),
        SelectOption::new("直接上傳", "upload"),
    ]
}

pub fn yes_no_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("是", "true"),
        SelectOption::new("否", "false"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_options() {
        let values: Vec<String> = upload_options().into_iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["downloadXML", "downloadAndUpload", "upload"]);
    }

    #[test]
    fn test_yes_no_options_wire_shape() {
        assert_eq!(
            serde_json::to_string(&yes_no_options()[0]).unwrap(),
            r#"{"label":"是","value":"true"}"#
        );
    }
}
