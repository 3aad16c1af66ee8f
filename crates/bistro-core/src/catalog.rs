//! # Menu and Review Types
//!
//! Collaborator records behind the plain listing endpoints.

use crate::money::Price;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An item on the menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique menu item ID (generated)
    pub id: Uuid,

    /// Item name
    pub name: String,

    /// Category (e.g., "salad", "dessert")
    pub category: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price
    pub price: Price,

    /// Optional image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Price) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            description: None,
            price,
            image_url: None,
        }
    }
}

/// Fields a menu update may change. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub image_url: Option<String>,
}

impl MenuItemPatch {
    /// Apply this patch to an existing item
    pub fn apply(&self, item: &mut MenuItem) {
        if let Some(ref name) = self.name {
            item.name = name.clone();
        }
        if let Some(ref category) = self.category {
            item.category = category.clone();
        }
        if let Some(ref description) = self.description {
            item.description = Some(description.clone());
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(ref image_url) = self.image_url {
            item.image_url = Some(image_url.clone());
        }
    }
}

/// A customer review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique review ID (generated)
    pub id: Uuid,

    /// Reviewer display name
    pub name: String,

    /// Rating, 0..=5
    pub rating: u8,

    /// Review body
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut item = MenuItem::new("Caesar Salad", "salad", Price::new(14.5, Currency::USD));
        let patch = MenuItemPatch {
            price: Some(Price::new(15.0, Currency::USD)),
            ..Default::default()
        };
        patch.apply(&mut item);

        assert_eq!(item.price.amount, 1500);
        assert_eq!(item.name, "Caesar Salad");
        assert_eq!(item.category, "salad");
    }
}
