//! Cart collaborator trait
//!
//! The cart itself lives outside this crate (it talks to the storefront
//! API). The coordinator only needs the one operation it replays.

use crate::error::Result;
use crate::pending::ProductId;
use async_trait::async_trait;

/// The cart collaborator invoked when replaying a deferred add-to-cart.
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Add `quantity` units of the product to the cart.
    async fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<()>;
}
