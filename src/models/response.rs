use serde::Deserialize;

use super::enums::OrderStatus;

/// A HATEOAS link returned with an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkDescription {
    pub href: String,
    pub rel: String,
    #[serde(default)]
    pub method: Option<String>,
}

/// The part of the Orders API response body that moves a draft order into
/// the submitted stage. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub links: Vec<LinkDescription>,
}

impl OrderResponse {
    pub fn link(&self, rel: &str) -> Option<&LinkDescription> {
        self.links.iter().find(|link| link.rel == rel)
    }

    /// Where the payer is sent to approve the order.
    pub fn approve_link(&self) -> Option<&str> {
        self.link("approve")
            .or_else(|| self.link("payer-action"))
            .map(|link| link.href.as_str())
    }
}
