use crate::mapper::OrderMapper;
use crate::models::Order;
use crate::state_machine::context::StateModel;
use crate::state_machine::errors::{bad_request, forbidden, StateMachineResult};
use crate::state_machine::states::OrderStatus;

/// Places new orders and lets a chef hand a COOKING order back to the queue.
/// Customers may also replace the pizzas of an order still waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatedHandler;

impl CreatedHandler {
    pub const ALLOWED: &'static [OrderStatus] = &[OrderStatus::Cooking, OrderStatus::Created];

    pub fn validate(&self, model: &StateModel) -> StateMachineResult<bool> {
        let request = model.request()?;

        match &model.current {
            None if !request.has_pizzas() => {
                Err(bad_request("Impossible to create an order without pizzas"))
            }
            Some(current)
                if current.status == OrderStatus::Cooking && request.chef_id != current.chef_id =>
            {
                Err(bad_request(
                    "Not allowed to restore an order cooked by another chef",
                ))
            }
            Some(current) if current.status == OrderStatus::Created && request.chef_id.is_some() => {
                Err(forbidden("A chef is not allowed to modify a queued order"))
            }
            _ => Ok(true),
        }
    }

    pub fn handle_state(
        &self,
        model: &mut StateModel,
        mapper: &OrderMapper,
    ) -> StateMachineResult<Order> {
        let request = model.request_mut()?;
        request.chef_id = None;
        let request = request.clone();

        let Some(mut current) = model.current.take() else {
            return Ok(mapper.to_entity(&request));
        };

        let was_created = current.status == OrderStatus::Created;
        current.chef_id = None;
        mapper.patch(&request, &mut current);

        if was_created && request.has_pizzas() {
            current.pizzas = request
                .pizzas
                .unwrap_or_default()
                .into_iter()
                .map(OrderMapper::to_pizza)
                .collect();
        }

        Ok(current)
    }
}
