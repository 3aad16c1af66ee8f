//! # Cart Types
//!
//! Cart line items. Every item is tagged with its owner's email; the owner
//! or the checkout coordinator (after a durable payment record) are the
//! only writers allowed to remove one.

use crate::money::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A line item in a caller's cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique cart item ID (generated)
    pub id: Uuid,

    /// Email of the identity that owns this item
    pub owner_email: String,

    /// The menu item this entry refers to
    pub menu_item_id: Uuid,

    /// Item name (denormalized for display)
    pub name: String,

    /// Price at the time the item was added
    pub price: Price,

    /// When the item was added
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    /// Create a new cart item for an owner
    pub fn new(
        owner_email: impl Into<String>,
        menu_item_id: Uuid,
        name: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_email: owner_email.into(),
            menu_item_id,
            name: name.into(),
            price,
            created_at: Utc::now(),
        }
    }

    /// Whether this item belongs to the given identity
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email == email
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_ownership_is_exact() {
        let item = CartItem::new(
            "a@x.com",
            Uuid::new_v4(),
            "Tiramisu",
            Price::new(8.0, Currency::USD),
        );
        assert!(item.is_owned_by("a@x.com"));
        assert!(!item.is_owned_by("b@x.com"));
    }
}
