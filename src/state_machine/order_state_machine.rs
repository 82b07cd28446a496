use super::{
    chef_locks::ChefLocks,
    context::StateModel,
    errors::{bad_request, internal_error, StateMachineError, StateMachineResult},
    handlers::StatusHandler,
    states::OrderStatus,
};
use crate::mapper::OrderMapper;
use crate::models::OrderDto;
use crate::repository::OrderRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// Dispatcher for order status transitions.
///
/// Holds one handler per status, built once. Every call looks up the handler
/// for the requested status, lets it locate and validate the order, checks
/// the current status against the handler's allowed predecessors, applies the
/// mutation, forces the target status and saves.
#[derive(Clone)]
pub struct OrderStateMachine {
    repository: Arc<dyn OrderRepository>,
    mapper: OrderMapper,
    handlers: Arc<HashMap<OrderStatus, StatusHandler>>,
    chef_locks: ChefLocks,
}

impl std::fmt::Debug for OrderStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStateMachine")
            .field("repository", &"Arc<dyn OrderRepository>")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("chef_locks", &self.chef_locks)
            .finish()
    }
}

impl OrderStateMachine {
    /// State machine with the full handler set
    pub fn new(repository: Arc<dyn OrderRepository>, cooking_threshold: i64) -> Self {
        Self::with_handlers(repository, StatusHandler::all(cooking_threshold))
    }

    /// State machine with an explicit handler set. Statuses without a handler
    /// fail with an internal error.
    pub fn with_handlers(
        repository: Arc<dyn OrderRepository>,
        handlers: impl IntoIterator<Item = StatusHandler>,
    ) -> Self {
        let handlers = handlers
            .into_iter()
            .map(|handler| (handler.status(), handler))
            .collect();

        Self {
            repository,
            mapper: OrderMapper::new(),
            handlers: Arc::new(handlers),
            chef_locks: ChefLocks::new(),
        }
    }

    pub fn repository(&self) -> &Arc<dyn OrderRepository> {
        &self.repository
    }

    pub fn mapper(&self) -> &OrderMapper {
        &self.mapper
    }

    pub fn supports(&self, status: OrderStatus) -> bool {
        self.handlers.contains_key(&status)
    }

    /// Drive one transition.
    ///
    /// `Ok(None)` means the handler found nothing to do: no queued order to
    /// cook, or no cooking order to complete. Everything else either succeeds
    /// with the saved order or fails with a classified error.
    pub async fn handle_state(
        &self,
        target: impl Into<Option<OrderStatus>>,
        model: StateModel,
    ) -> StateMachineResult<Option<OrderDto>> {
        let target = target
            .into()
            .ok_or_else(|| bad_request("Invalid input for handling state"))?;
        model.request()?;

        let handler = self.handlers.get(&target).ok_or_else(|| {
            internal_error(format!("No handler registered for status [{target}]"))
        })?;

        let span = info_span!(
            "order_transition",
            target = %target,
            order_id = ?model.id,
            chef_id = ?model.chef_id(),
            correlation_id = %model.correlation_id,
        );

        self.transition(handler, target, model)
            .instrument(span)
            .await
    }

    async fn transition(
        &self,
        handler: &StatusHandler,
        target: OrderStatus,
        mut model: StateModel,
    ) -> StateMachineResult<Option<OrderDto>> {
        // admission check and claim must not interleave for the same chef
        let _chef_guard = match (target, model.chef_id()) {
            (OrderStatus::Cooking, Some(chef_id)) => {
                Some(self.chef_locks.acquire(chef_id).await)
            }
            _ => None,
        };

        handler
            .retrieve_current(&mut model, self.repository.as_ref())
            .await?;

        let valid = handler
            .validate(&model, self.repository.as_ref())
            .await
            .inspect_err(|err| warn!(kind = %err.kind(), error = %err, "Transition rejected"))?;
        if !valid {
            debug!(handler = handler.description(), "Nothing to transition");
            return Ok(None);
        }

        let current_status = model.current.as_ref().map(|order| order.status);
        if !handler.allows(current_status) {
            warn!(current = ?current_status, "Rejected incompatible transition");
            return Err(StateMachineError::InvalidTransition {
                from: current_status,
                to: target,
            });
        }

        let mut order = handler.handle_state(&mut model, &self.mapper)?;
        order.status = target;

        let saved = self.repository.save(order).await?;
        info!(
            order_id = ?saved.id,
            code = ?saved.code,
            from = ?current_status,
            "Order transitioned"
        );

        Ok(Some(self.mapper.to_dto(&saved)))
    }
}
