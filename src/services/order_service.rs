//! # Order Service
//!
//! Entry point for order operations. Creation and reads go straight to the
//! repository; every status change is delegated to the `OrderStateMachine`.

use crate::config::KitchenConfig;
use crate::constants::operations;
use crate::error::{PizzaError, Result};
use crate::logging::log_order_operation;
use crate::mapper::OrderMapper;
use crate::models::{OrderDto, OrderRequest};
use crate::repository::OrderRepository;
use crate::state_machine::{OrderStateMachine, OrderStatus, StateModel};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
    state_machine: OrderStateMachine,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepository>, kitchen: &KitchenConfig) -> Self {
        let state_machine = OrderStateMachine::new(repository.clone(), kitchen.cooking_threshold);
        Self {
            repository,
            state_machine,
        }
    }

    pub fn with_state_machine(state_machine: OrderStateMachine) -> Self {
        Self {
            repository: state_machine.repository().clone(),
            state_machine,
        }
    }

    pub fn state_machine(&self) -> &OrderStateMachine {
        &self.state_machine
    }

    fn mapper(&self) -> &OrderMapper {
        self.state_machine.mapper()
    }

    /// Place a new order. No prior status exists, so this is the one write
    /// that does not go through the state machine.
    pub async fn create_order(&self, request: OrderRequest) -> Result<OrderDto> {
        if request.customer_id.is_none() {
            return Err(PizzaError::BadRequest(
                "An order requires a customer".to_string(),
            ));
        }
        if !request.has_pizzas() {
            return Err(PizzaError::BadRequest(
                "An order requires at least one pizza".to_string(),
            ));
        }

        let mut order = self.mapper().to_entity(&request);
        order.status = OrderStatus::Created;
        order.chef_id = None;

        let saved = self.repository.save(order).await?;
        log_order_operation(
            operations::ORDER_CREATED,
            saved.id,
            saved.code,
            saved.status.as_str(),
            None,
        );

        Ok(self.mapper().to_dto(&saved))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<OrderDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|order| self.mapper().to_dto(&order))
            .ok_or_else(|| PizzaError::NotFound(format!("Order {id} not found")))
    }

    pub async fn find_by_code(&self, code: i64) -> Result<OrderDto> {
        self.repository
            .find_by_code(code)
            .await?
            .map(|order| self.mapper().to_dto(&order))
            .ok_or_else(|| PizzaError::NotFound(format!("Order with code {code} not found")))
    }

    /// Orders in the given statuses, oldest first. No filter means every
    /// status.
    pub async fn find_all_orders(&self, statuses: Option<&[OrderStatus]>) -> Result<Vec<OrderDto>> {
        let statuses = match statuses {
            Some(statuses) if !statuses.is_empty() => statuses,
            _ => &OrderStatus::ALL[..],
        };

        let orders = self
            .repository
            .find_all_sorted_by_created_date(statuses)
            .await?;
        debug!(count = orders.len(), ?statuses, "Listed orders");

        Ok(orders.iter().map(|order| self.mapper().to_dto(order)).collect())
    }

    /// Move an order to `request.status` on behalf of `chef_id` (or the
    /// customer, when absent).
    pub async fn update_order(
        &self,
        id: i64,
        request: OrderRequest,
        chef_id: Option<i64>,
    ) -> Result<OrderDto> {
        let request = request.with_chef(chef_id);
        let target = request.status;
        let model = StateModel::new(request).with_id(Some(id));

        let updated = self
            .state_machine
            .handle_state(target, model)
            .await?
            .ok_or_else(|| PizzaError::Internal("Impossible to update Order".to_string()))?;

        log_order_operation(
            operations::ORDER_TRANSITIONED,
            updated.id,
            updated.code,
            updated.status.as_str(),
            None,
        );
        Ok(updated)
    }

    /// Finish whatever the chef is cooking, then claim the next order.
    ///
    /// The two steps commit independently. `Ok(None)` means nothing was
    /// left to claim.
    pub async fn take_next(&self, chef_id: i64, id: Option<i64>) -> Result<Option<OrderDto>> {
        let finished = self
            .state_machine
            .handle_state(
                OrderStatus::Done,
                StateModel::new(OrderRequest::for_chef(chef_id)),
            )
            .await?;
        if let Some(order) = &finished {
            info!(chef_id, order_id = ?order.id, "Chef completed cooking order");
        }

        let claimed = self
            .state_machine
            .handle_state(
                OrderStatus::Cooking,
                StateModel::new(OrderRequest::for_chef(chef_id)).with_id(id),
            )
            .await?;

        let details = match &claimed {
            Some(_) => "claimed",
            None => "queue empty",
        };
        log_order_operation(
            operations::ORDER_CLAIM_NEXT,
            claimed.as_ref().and_then(|o| o.id),
            claimed.as_ref().and_then(|o| o.code),
            claimed
                .as_ref()
                .map_or(OrderStatus::Cooking.as_str(), |o| o.status.as_str()),
            Some(details),
        );

        Ok(claimed)
    }
}
