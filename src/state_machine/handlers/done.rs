use crate::models::Order;
use crate::repository::OrderRepository;
use crate::state_machine::context::StateModel;
use crate::state_machine::errors::{bad_request, internal_error, StateMachineResult};
use crate::state_machine::states::OrderStatus;

/// The cooking chef marks their order as finished
#[derive(Debug, Clone, Copy, Default)]
pub struct DoneHandler;

impl DoneHandler {
    pub const ALLOWED: &'static [OrderStatus] = &[OrderStatus::Cooking];

    /// The chef is mandatory even when an explicit id is given
    pub async fn retrieve_current(
        &self,
        model: &mut StateModel,
        repository: &dyn OrderRepository,
    ) -> StateMachineResult<()> {
        let chef_id = model
            .chef_id()
            .ok_or_else(|| bad_request("A chef is required to complete an order"))?;

        if model.current.is_some() {
            return Ok(());
        }

        model.current = match model.id {
            Some(id) => repository.find_by_id(id).await?,
            None => repository.find_cooking_order(chef_id).await?,
        };
        Ok(())
    }

    pub fn validate(&self, model: &StateModel) -> StateMachineResult<bool> {
        let Some(current) = &model.current else {
            return Ok(false);
        };

        let owner = current
            .chef_id
            .ok_or_else(|| internal_error(format!("Order {:?} has no chef assigned", current.id)))?;

        if model.chef_id() != Some(owner) {
            return Err(bad_request(
                "Not allowed to complete an order cooked by another chef",
            ));
        }

        Ok(true)
    }
}
