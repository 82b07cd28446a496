//! # Pizza Model
//!
//! Pizzas are catalog entries owned outside the order lifecycle. Orders only
//! hold references to them; name and price are hydrated by the repository
//! when the pizza is known to its catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pizza as referenced from an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pizza {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

impl Pizza {
    /// Full catalog entry
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            name: Some(name.into()),
            description: Some(description.into()),
            price: Some(price),
        }
    }

    /// Bare reference by id, as built from a request
    pub fn reference(id: i64) -> Self {
        Self {
            id,
            name: None,
            description: None,
            price: None,
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.name.is_some() && self.price.is_some()
    }
}
