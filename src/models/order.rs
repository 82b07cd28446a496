//! # Order Model
//!
//! One customer purchase moving through the kitchen.
//!
//! ## Lifecycle
//!
//! ```text
//! CREATED ──claim──▶ COOKING ──complete──▶ DONE
//!    │  ▲               │
//!    │  └───restore─────┘
//!    └──cancel──▶ CANCELED
//! ```
//!
//! Once persisted, `status`, `chef_id` and `pizzas` change only through the
//! order state machine. The initial insert is the single path that bypasses
//! it, since no prior status exists to validate against.
//!
//! ## Database Schema
//!
//! Maps to the `orders` table with pizzas in `order_pizzas`:
//! - `id`: Primary key (BIGSERIAL)
//! - `code`: Human-facing code from `order_code_seq`, unique and immutable
//! - `status`: One of `CREATED | COOKING | DONE | CANCELED`
//! - `chef_id`: Set while COOKING and after DONE
//! - `version`: Optimistic concurrency counter

use crate::state_machine::states::OrderStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pizza::Pizza;

/// Persisted order entity.
///
/// `id` and `code` stay `None` until the first save assigns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<i64>,
    pub code: Option<i64>,
    pub status: OrderStatus,
    pub pizzas: Vec<Pizza>,
    pub chef_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// New, unsaved order in CREATED status
    pub fn new(customer_id: Option<i64>, pizzas: Vec<Pizza>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            code: None,
            status: OrderStatus::Created,
            pizzas,
            chef_id: None,
            customer_id,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn pizza_ids(&self) -> Vec<i64> {
        self.pizzas.iter().map(|p| p.id).collect()
    }

    /// Mark the order as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Transition request: what the caller wants to happen to an order.
///
/// Absent fields mean "leave untouched" when the request is patched onto an
/// existing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub status: Option<OrderStatus>,
    pub pizzas: Option<Vec<i64>>,
    pub chef_id: Option<i64>,
    pub customer_id: Option<i64>,
}

impl OrderRequest {
    /// Request acting on behalf of a chef, with nothing else set
    pub fn for_chef(chef_id: i64) -> Self {
        Self {
            chef_id: Some(chef_id),
            ..Self::default()
        }
    }

    /// Customer request placing the given pizzas
    pub fn for_customer(customer_id: i64, pizzas: Vec<i64>) -> Self {
        Self {
            status: Some(OrderStatus::Created),
            pizzas: Some(pizzas),
            customer_id: Some(customer_id),
            chef_id: None,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_pizzas(mut self, pizzas: Vec<i64>) -> Self {
        self.pizzas = Some(pizzas);
        self
    }

    pub fn with_chef(mut self, chef_id: Option<i64>) -> Self {
        self.chef_id = chef_id;
        self
    }

    /// True when the request carries at least one pizza
    pub fn has_pizzas(&self) -> bool {
        self.pizzas.as_ref().is_some_and(|p| !p.is_empty())
    }
}

/// Output representation of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: Option<i64>,
    pub code: Option<i64>,
    pub status: OrderStatus,
    pub pizzas: Vec<Pizza>,
    pub chef_id: Option<i64>,
    pub customer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
