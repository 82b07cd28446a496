//! # Order Mapper
//!
//! Conversions between transition requests, the persisted order and its
//! output representation.

use crate::models::{Order, OrderDto, OrderRequest, Pizza};
use crate::state_machine::states::OrderStatus;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderMapper;

impl OrderMapper {
    pub fn new() -> Self {
        Self
    }

    /// Build a new order from a request. Status defaults to CREATED and the
    /// chef is never copied.
    pub fn to_entity(&self, request: &OrderRequest) -> Order {
        let pizzas = request
            .pizzas
            .as_deref()
            .unwrap_or_default()
            .iter()
            .copied()
            .map(Self::to_pizza)
            .collect();

        let mut order = Order::new(request.customer_id, pizzas);
        order.status = request.status.unwrap_or(OrderStatus::Created);
        order
    }

    /// Patch an existing order in place. Absent request fields leave the
    /// order untouched; pizzas and customer are never patched.
    pub fn patch(&self, request: &OrderRequest, order: &mut Order) {
        if let Some(status) = request.status {
            order.status = status;
        }
        if let Some(chef_id) = request.chef_id {
            order.chef_id = Some(chef_id);
        }
        order.touch();
    }

    pub fn to_dto(&self, order: &Order) -> OrderDto {
        OrderDto {
            id: order.id,
            code: order.code,
            status: order.status,
            pizzas: order.pizzas.clone(),
            chef_id: order.chef_id,
            customer_id: order.customer_id,
            total_amount: Self::total_amount(&order.pizzas),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }

    pub fn to_pizza(id: i64) -> Pizza {
        Pizza::reference(id)
    }

    /// Sum of the prices of the priced pizzas; `None` for an empty set
    pub fn total_amount(pizzas: &[Pizza]) -> Option<Decimal> {
        if pizzas.is_empty() {
            return None;
        }

        Some(pizzas.iter().filter_map(|p| p.price).sum())
    }
}
