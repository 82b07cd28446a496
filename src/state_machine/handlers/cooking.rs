use crate::constants::DEFAULT_COOKING_THRESHOLD;
use crate::mapper::OrderMapper;
use crate::models::Order;
use crate::repository::OrderRepository;
use crate::state_machine::context::StateModel;
use crate::state_machine::errors::{bad_request, conflict, StateMachineResult};
use crate::state_machine::handlers::take_current;
use crate::state_machine::states::OrderStatus;
use tracing::debug;

/// A chef claims an order. Without an explicit id the oldest queued order is
/// picked. Admission is capped by the per-chef cooking threshold.
#[derive(Debug, Clone, Copy)]
pub struct CookingHandler {
    threshold: i64,
}

impl Default for CookingHandler {
    fn default() -> Self {
        Self::new(DEFAULT_COOKING_THRESHOLD)
    }
}

impl CookingHandler {
    pub const ALLOWED: &'static [OrderStatus] = &[OrderStatus::Created];

    pub fn new(threshold: i64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub async fn retrieve_current(
        &self,
        model: &mut StateModel,
        repository: &dyn OrderRepository,
    ) -> StateMachineResult<()> {
        if model.current.is_some() {
            return Ok(());
        }

        model.current = match model.id {
            Some(id) => repository.find_by_id(id).await?,
            None => repository
                .find_all_sorted_by_created_date(&[OrderStatus::Created])
                .await?
                .into_iter()
                .next(),
        };
        Ok(())
    }

    pub async fn validate(
        &self,
        model: &StateModel,
        repository: &dyn OrderRepository,
    ) -> StateMachineResult<bool> {
        if model.current.is_none() {
            debug!("No order available to cook");
            return Ok(false);
        }

        let chef_id = model
            .request()?
            .chef_id
            .ok_or_else(|| bad_request("A chef is required to cook an order"))?;

        if !repository.can_take_any_order(chef_id, self.threshold).await? {
            return Err(conflict(format!(
                "Chef {chef_id} already cooks the maximum of {} orders",
                self.threshold
            )));
        }

        Ok(true)
    }

    /// Binds the requesting chef to the order
    pub fn handle_state(
        &self,
        model: &mut StateModel,
        mapper: &OrderMapper,
    ) -> StateMachineResult<Order> {
        let request = model.request()?.clone();
        let mut current = take_current(model)?;
        mapper.patch(&request, &mut current);
        Ok(current)
    }
}
