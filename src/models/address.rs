use serde::{Deserialize, Serialize};

use super::is_blank;
use crate::validation::ValidationReport;

/// Postal address of the person receiving the items.
///
/// Every field is optional; blank fields are dropped when serializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Two-letter country code.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub country_code: Option<String>,
    /// Top-level administrative subdivision (state, province).
    #[serde(default, skip_serializing_if = "is_blank")]
    pub admin_area_1: Option<String>,
    /// City, town or village.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub admin_area_2: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub address_line_1: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub address_line_2: Option<String>,
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field addressed by `key`, accepting both the form-facing
    /// names (`CountryCode`, `AddressLine1`, ...) and the API names
    /// (`country_code`, `address_line_1`, ...). Returns false for unknown keys.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key {
            "CountryCode" | "country_code" => &mut self.country_code,
            "AdminArea1" | "admin_area_1" => &mut self.admin_area_1,
            "AdminArea2" | "admin_area_2" => &mut self.admin_area_2,
            "PostalCode" | "postal_code" => &mut self.postal_code,
            "AddressLine1" | "address_line_1" => &mut self.address_line_1,
            "AddressLine2" | "address_line_2" => &mut self.address_line_2,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// True when no field holds a non-blank value.
    pub fn is_empty(&self) -> bool {
        [
            &self.country_code,
            &self.admin_area_1,
            &self.admin_area_2,
            &self.postal_code,
            &self.address_line_1,
            &self.address_line_2,
        ]
        .into_iter()
        .all(is_blank)
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.is_empty() {
            report.push("Shipping address has no fields set");
        } else if is_blank(&self.country_code) {
            report.push("Shipping address requires a country code");
        }
        report
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Address {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut address = Address::new();
        for (key, value) in iter {
            address.set_field(key.as_ref(), value);
        }
        address
    }
}
