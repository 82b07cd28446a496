use crate::state_machine::context::StateModel;
use crate::state_machine::errors::{bad_request, forbidden, StateMachineResult};
use crate::state_machine::states::OrderStatus;

/// Customers cancel orders that nobody has started cooking
#[derive(Debug, Clone, Copy, Default)]
pub struct CanceledHandler;

impl CanceledHandler {
    pub const ALLOWED: &'static [OrderStatus] = &[OrderStatus::Created];

    pub fn validate(&self, model: &StateModel) -> StateMachineResult<bool> {
        if model.current.is_none() {
            return Err(bad_request("No order found to cancel"));
        }
        if model.request()?.chef_id.is_some() {
            return Err(forbidden("A chef is not allowed to cancel an order"));
        }
        Ok(true)
    }
}
