use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::enums::{OrderIntent, OrderStatus};
use super::experience_context::ExperienceContext;
use super::payment_source::PaymentSource;
use super::purchase_unit::PurchaseUnit;
use super::response::OrderResponse;
use crate::config::CheckoutConfig;
use crate::errors::OrderError;
use crate::validation::ValidationReport;

/// Most purchase units the Orders API accepts on one order today.
pub const MAX_PURCHASE_UNITS: usize = 1;

/// Aggregate root of a checkout order.
///
/// An order starts as a draft that the caller builds up. Once
/// [`Order::apply_response`] records the id assigned by the API the order is
/// submitted, and every mutator fails with [`OrderError::OrderSubmitted`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    intent: OrderIntent,
    purchase_units: Vec<PurchaseUnit>,
    payment_source: Option<PaymentSource>,
    id: Option<String>,
    status: Option<OrderStatus>,
}

/// Borrowed view of an order in the request shape of the Orders API.
///
/// Only produced by [`Order::to_payload`], so it always carries a purchase
/// unit and a payment source.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload<'a> {
    intent: OrderIntent,
    purchase_units: &'a [PurchaseUnit],
    payment_source: &'a PaymentSource,
}

impl Order {
    pub fn new(intent: OrderIntent) -> Self {
        Self {
            intent,
            ..Default::default()
        }
    }

    /// Draft order with the configured intent and a PayPal payment source
    /// seeded from the configured experience defaults.
    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self {
            intent: config.default_intent,
            payment_source: Some(PaymentSource::from(ExperienceContext::from_config(config))),
            ..Default::default()
        }
    }

    pub fn intent(&self) -> OrderIntent {
        self.intent
    }

    pub fn set_intent(&mut self, intent: OrderIntent) -> Result<(), OrderError> {
        self.ensure_draft()?;
        self.intent = intent;
        Ok(())
    }

    pub fn set_intent_str(&mut self, intent: &str) -> Result<(), OrderError> {
        let intent = intent.parse()?;
        self.set_intent(intent)
    }

    pub fn purchase_units(&self) -> &[PurchaseUnit] {
        &self.purchase_units
    }

    pub fn add_purchase_unit(&mut self, unit: PurchaseUnit) -> Result<(), OrderError> {
        self.ensure_draft()?;
        if self.purchase_units.len() >= MAX_PURCHASE_UNITS {
            warn!(
                units = self.purchase_units.len(),
                "rejected purchase unit beyond the supported limit"
            );
            return Err(OrderError::purchase_unit_limit());
        }
        debug!(
            currency = %unit.currency(),
            items = unit.items().len(),
            "added purchase unit to order"
        );
        self.purchase_units.push(unit);
        Ok(())
    }

    pub fn with_purchase_unit(mut self, unit: PurchaseUnit) -> Result<Self, OrderError> {
        self.add_purchase_unit(unit)?;
        Ok(self)
    }

    pub fn purchase_unit(&self, index: usize) -> Option<&PurchaseUnit> {
        self.purchase_units.get(index)
    }

    pub fn purchase_unit_mut(&mut self, index: usize) -> Result<&mut PurchaseUnit, OrderError> {
        self.ensure_draft()?;
        self.purchase_units
            .get_mut(index)
            .ok_or_else(|| out_of_range(index))
    }

    /// Replaces the unit at `index` and returns the previous one. An index
    /// one past the end appends, subject to [`MAX_PURCHASE_UNITS`].
    pub fn set_purchase_unit(
        &mut self,
        index: usize,
        unit: PurchaseUnit,
    ) -> Result<Option<PurchaseUnit>, OrderError> {
        self.ensure_draft()?;
        if index == self.purchase_units.len() {
            self.add_purchase_unit(unit)?;
            return Ok(None);
        }
        let slot = self
            .purchase_units
            .get_mut(index)
            .ok_or_else(|| out_of_range(index))?;
        Ok(Some(std::mem::replace(slot, unit)))
    }

    pub fn remove_purchase_unit(&mut self, index: usize) -> Result<Option<PurchaseUnit>, OrderError> {
        self.ensure_draft()?;
        if index < self.purchase_units.len() {
            Ok(Some(self.purchase_units.remove(index)))
        } else {
            Ok(None)
        }
    }

    pub fn has_purchase_unit(&self, index: usize) -> bool {
        index < self.purchase_units.len()
    }

    pub fn payment_source(&self) -> Option<&PaymentSource> {
        self.payment_source.as_ref()
    }

    pub fn set_payment_source(&mut self, source: impl Into<PaymentSource>) -> Result<(), OrderError> {
        self.ensure_draft()?;
        self.payment_source = Some(source.into());
        Ok(())
    }

    pub fn with_payment_source(mut self, source: impl Into<PaymentSource>) -> Result<Self, OrderError> {
        self.set_payment_source(source)?;
        Ok(self)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn status(&self) -> Option<OrderStatus> {
        self.status
    }

    pub fn is_submitted(&self) -> bool {
        self.id.is_some()
    }

    pub fn require_id(&self) -> Result<&str, OrderError> {
        self.id.as_deref().ok_or(OrderError::MissingOrderId)
    }

    /// Records the id and status returned by the API. A later response may
    /// update the status of the same order but not change its id.
    pub fn apply_response(&mut self, response: &OrderResponse) -> Result<(), OrderError> {
        if let Some(id) = &self.id {
            if *id != response.id {
                return Err(OrderError::InvalidOrder(format!(
                    "Response for order {} does not match order {}",
                    response.id, id
                )));
            }
        }
        info!(order_id = %response.id, status = %response.status, "order submitted");
        self.id = Some(response.id.clone());
        self.status = Some(response.status);
        Ok(())
    }

    /// Collects every finding of the order tree. An empty report means the
    /// order is ready to submit.
    #[instrument(skip(self), fields(intent = %self.intent, units = self.purchase_units.len()))]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if self.purchase_units.is_empty() {
            report.push("There are no purchase units associated with this order");
        }
        for unit in &self.purchase_units {
            report.merge(unit.validate());
        }

        match &self.payment_source {
            Some(source) => report.merge(source.validate()),
            None => report.push("Missing order payment source"),
        }

        debug!(findings = report.len(), "validated order");
        report
    }

    /// Builds the request body. Only the structural minimum is enforced
    /// here; everything else is left to [`Order::validate`].
    #[instrument(skip(self), fields(intent = %self.intent, units = self.purchase_units.len()))]
    pub fn to_payload(&self) -> Result<OrderPayload<'_>, OrderError> {
        if self.purchase_units.is_empty() {
            warn!("refused to serialize an order without purchase units");
            return Err(OrderError::invalid_purchase_unit());
        }
        let payment_source = self.payment_source.as_ref().ok_or_else(|| {
            warn!("refused to serialize an order without a payment source");
            OrderError::invalid_payment_source()
        })?;

        Ok(OrderPayload {
            intent: self.intent,
            purchase_units: &self.purchase_units,
            payment_source,
        })
    }

    pub fn to_json(&self) -> Result<serde_json::Value, OrderError> {
        Ok(serde_json::to_value(self.to_payload()?)?)
    }

    pub fn to_json_string(&self) -> Result<String, OrderError> {
        Ok(serde_json::to_string(&self.to_payload()?)?)
    }

    fn ensure_draft(&self) -> Result<(), OrderError> {
        match &self.id {
            Some(id) => Err(OrderError::OrderSubmitted(id.clone())),
            None => Ok(()),
        }
    }
}

fn out_of_range(index: usize) -> OrderError {
    OrderError::InvalidOrder(format!("No purchase unit at index {}", index))
}
