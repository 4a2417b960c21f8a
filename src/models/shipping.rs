use serde::Serialize;

use super::address::Address;
use super::enums::ShippingType;
use super::non_empty;
use crate::errors::OrderError;
use crate::validation::ValidationReport;

/// Name of the recipient; the API only supports `full_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingName {
    pub full_name: String,
}

/// How and to whom the purchase unit is fulfilled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShippingDetail {
    #[serde(rename = "type")]
    shipping_type: ShippingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<ShippingName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
}

impl ShippingDetail {
    pub fn new(shipping_type: ShippingType) -> Self {
        Self {
            shipping_type,
            ..Default::default()
        }
    }

    pub fn shipping_type(&self) -> ShippingType {
        self.shipping_type
    }

    pub fn set_shipping_type(&mut self, shipping_type: ShippingType) {
        self.shipping_type = shipping_type;
    }

    /// Parses and sets the type from its wire string.
    pub fn set_shipping_type_str(&mut self, shipping_type: &str) -> Result<(), OrderError> {
        self.shipping_type = shipping_type.parse()?;
        Ok(())
    }

    pub fn shipping_name(&self) -> Option<&str> {
        self.name.as_ref().map(|name| name.full_name.as_str())
    }

    pub fn set_shipping_name(&mut self, full_name: impl Into<String>) {
        self.name = non_empty(full_name).map(|full_name| ShippingName { full_name });
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn set_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.set_address(address);
        self
    }

    /// Reports a missing or incomplete address. The type is always a member
    /// of [`ShippingType`], so only the address can be wrong here.
    pub fn validate(&self) -> ValidationReport {
        match &self.address {
            Some(address) => address.validate(),
            None => ["Shipping detail requires an address"].into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn address() -> Address {
        [("CountryCode", "US"), ("PostalCode", "95131")]
            .into_iter()
            .collect()
    }

    #[test]
    fn serializes_type_name_and_address() {
        let mut detail = ShippingDetail::new(ShippingType::PickupInStore).with_address(address());
        detail.set_shipping_name("John Doe");

        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({
                "type": "PICKUP_IN_STORE",
                "name": {"full_name": "John Doe"},
                "address": {"country_code": "US", "postal_code": "95131"}
            })
        );
        assert!(detail.validate().is_valid());
    }

    #[test]
    fn defaults_to_shipping_type() {
        assert_eq!(ShippingDetail::default().shipping_type(), ShippingType::Shipping);
    }

    #[test]
    fn invalid_type_string_is_rejected_and_keeps_previous() {
        let mut detail = ShippingDetail::new(ShippingType::PickupInPerson);
        assert_matches!(
            detail.set_shipping_type_str("TELEPORT"),
            Err(OrderError::InvalidShippingType(v)) if v == "TELEPORT"
        );
        assert_eq!(detail.shipping_type(), ShippingType::PickupInPerson);
    }

    #[test]
    fn missing_address_is_a_validation_finding_not_a_serialization_error() {
        let detail = ShippingDetail::default();
        assert_eq!(detail.validate().findings(), ["Shipping detail requires an address"]);
        assert_eq!(serde_json::to_value(&detail).unwrap(), json!({"type": "SHIPPING"}));
    }

    #[test]
    fn nested_address_findings_are_surfaced() {
        let detail = ShippingDetail::default().with_address(Address::new());
        assert!(detail.validate().mentions("no fields set"));
    }
}
