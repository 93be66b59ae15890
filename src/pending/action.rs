//! Deferred action types.

use serde::{Deserialize, Serialize};

/// A product identifier as the backend sends it — numeric or string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A gated action deferred across the login redirect.
///
/// Closed enumeration: the coordinator dispatches on exactly these kinds.
/// Durable form is adjacently tagged (`{"type": "add_to_cart", "data":
/// {...}}`) with snake_case tags, the stable wire names.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PendingAction {
    /// Put a product in the cart.
    AddToCart {
        product_id: ProductId,
        #[serde(default = "default_quantity")]
        quantity: u32,
    },

    /// Stage a product for immediate checkout.
    BuyNow(serde_json::Value),

    /// Open the order history.
    ViewOrders,

    /// Open the profile page.
    ViewProfile,

    /// Route to an arbitrary path.
    Navigate { path: String },
}

fn default_quantity() -> u32 {
    1
}

impl PendingAction {
    /// The wire name of this action kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddToCart { .. } => "add_to_cart",
            Self::BuyNow(_) => "buy_now",
            Self::ViewOrders => "view_orders",
            Self::ViewProfile => "view_profile",
            Self::Navigate { .. } => "navigate",
        }
    }
}

/// The durable envelope around a pending action.
///
/// `stored_at` lets the ledger discard actions older than the configured
/// maximum age when one is set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoredAction {
    pub action: PendingAction,
    pub stored_at: u64,
}
