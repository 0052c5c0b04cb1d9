use crate::shared::options::SelectOption;
use serde::{Deserialize, Serialize};

/// Статус получения номера счёта (GUI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[serde(rename = "")]
    NotIssued,
    #[serde(rename = "DRAFT")]
    Draft,
    #[serde(rename = "ISSUED")]
    Issued,
    #[serde(rename = "VOIDED")]
    Voided,
}

impl InvoiceStatus {
    pub fn code(&self) -> &'static str {
        match self {
            InvoiceStatus::NotIssued => "",
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Issued => "ISSUED",
            InvoiceStatus::Voided => "VOIDED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InvoiceStatus::NotIssued => "尚未取號",
            InvoiceStatus::Draft => "暫存取號",
            InvoiceStatus::Issued => "取號",
            InvoiceStatus::Voided => "作廢",
        }
    }

    pub fn all() -> Vec<InvoiceStatus> {
        vec![
            InvoiceStatus::NotIssued,
            InvoiceStatus::Draft,
            InvoiceStatus::Issued,
            InvoiceStatus::Voided,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "" => Some(InvoiceStatus::NotIssued),
            "DRAFT" => Some(InvoiceStatus::Draft),
            "ISSUED" => Some(InvoiceStatus::Issued),
            "VOIDED" => Some(InvoiceStatus::Voided),
            _ => None,
        }
    }
}

/// Подпись статуса; неизвестный код возвращается как есть
pub fn invoice_status_label(code: &str) -> String {
    InvoiceStatus::from_code(code)
        .map(|s| s.display_name().to_string())
        .unwrap_or_else(|| code.to_string())
}

pub fn invoice_status_options() -> Vec<SelectOption> {
    InvoiceStatus::all()
        .into_iter()
        .map(|s| SelectOption::new(s.display_name(), s.code()))
        .collect()
}

/// Статус выгрузки счёта на платформу
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceUploadStatus {
    None,
    Issued,
    Voided,
}

impl InvoiceUploadStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "" => Some(InvoiceUploadStatus::None),
            "ISSUED" => Some(InvoiceUploadStatus::Issued),
            "VOIDED" => Some(InvoiceUploadStatus::Voided),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InvoiceUploadStatus::None => "-",
            InvoiceUploadStatus::Issued => "完成",
            InvoiceUploadStatus::Voided => "尚未上傳",
        }
    }
}

pub fn upload_status_label(code: &str) -> String {
    InvoiceUploadStatus::from_code(code)
        .map(|s| s.display_name().to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Записи журнала операций со счётом
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceLogStatus {
    TakeGuiNumber,
    Printed,
    Uploaded,
    Pending,
    Success,
}

impl InvoiceLogStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            InvoiceLogStatus::TakeGuiNumber => "取號",
            InvoiceLogStatus::Printed => "列印",
            InvoiceLogStatus::Uploaded => "已上傳",
            InvoiceLogStatus::Pending => "尚未上傳",
            InvoiceLogStatus::Success => "上傳成功",
        }
    }
}

/// Справочники системных настроек, запрашиваемые у backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemOption {
    TaxType,
    InOutTaxCategory,
    InvoiceType,
    TaxPurpose,
    RegionalTaxAuthority,
    BusinessTaxDeclarationType,
    DeductionCode,
    B2CMode,
    InvoiceMode,
}

impl SystemOption {
    pub fn key(&self) -> &'static str {
        match self {
            SystemOption::TaxType => "TAX_TYPE",
            SystemOption::InOutTaxCategory => "IN_OUT_TAX_CATEGORY",
            SystemOption::InvoiceType => "INVOICE_TYPE",
            SystemOption::TaxPurpose => "TAX_PURPOSE",
            SystemOption::RegionalTaxAuthority => "KR_TAXOFF",
            SystemOption::BusinessTaxDeclarationType => "BIZ_DECL_TYPE",
            SystemOption::DeductionCode => "DEDUCTION_CODE",
            SystemOption::B2CMode => "B2C_MODE",
            SystemOption::InvoiceMode => "INVOICE_MODE",
        }
    }

    pub fn all() -> Vec<SystemOption> {
        vec![
            SystemOption::TaxType,
            SystemOption::InOutTaxCategory,
            SystemOption::InvoiceType,
            SystemOption::TaxPurpose,
            SystemOption::RegionalTaxAuthority,
            SystemOption::BusinessTaxDeclarationType,
            SystemOption::DeductionCode,
            SystemOption::B2CMode,
            SystemOption::InvoiceMode,
        ]
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|o| o.key() == key)
    }
}
