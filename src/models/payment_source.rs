use serde::Serialize;

use super::experience_context::ExperienceContext;
use crate::validation::ValidationReport;

/// The PayPal wallet as funding source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayPalPaymentSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    experience_context: Option<ExperienceContext>,
}

impl PayPalPaymentSource {
    pub fn new(experience_context: ExperienceContext) -> Self {
        Self {
            experience_context: Some(experience_context),
        }
    }

    pub fn experience_context(&self) -> Option<&ExperienceContext> {
        self.experience_context.as_ref()
    }

    pub fn experience_context_mut(&mut self) -> Option<&mut ExperienceContext> {
        self.experience_context.as_mut()
    }

    pub fn set_experience_context(&mut self, experience_context: ExperienceContext) {
        self.experience_context = Some(experience_context);
    }

    pub fn validate(&self) -> ValidationReport {
        match &self.experience_context {
            Some(context) => context.validate(),
            None => ["Missing experience context for PayPal payment source"]
                .into_iter()
                .collect(),
        }
    }
}

/// Funding source of an order. Only the PayPal wallet is supported.
///
/// Serializes as `{"paypal": {"experience_context": {...}}}`, or `{}` when
/// no source is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    paypal: Option<PayPalPaymentSource>,
}

impl PaymentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paypal(source: PayPalPaymentSource) -> Self {
        Self {
            paypal: Some(source),
        }
    }

    pub fn paypal_source(&self) -> Option<&PayPalPaymentSource> {
        self.paypal.as_ref()
    }

    pub fn paypal_source_mut(&mut self) -> Option<&mut PayPalPaymentSource> {
        self.paypal.as_mut()
    }

    pub fn set_paypal_source(&mut self, source: PayPalPaymentSource) {
        self.paypal = Some(source);
    }

    pub fn is_empty(&self) -> bool {
        self.paypal.is_none()
    }

    pub fn validate(&self) -> ValidationReport {
        match &self.paypal {
            Some(source) => source.validate(),
            None => ["Payment source required"].into_iter().collect(),
        }
    }
}

impl From<PayPalPaymentSource> for PaymentSource {
    fn from(source: PayPalPaymentSource) -> Self {
        Self::paypal(source)
    }
}

impl From<ExperienceContext> for PaymentSource {
    fn from(context: ExperienceContext) -> Self {
        Self::paypal(PayPalPaymentSource::new(context))
    }
}
