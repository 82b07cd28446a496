//! # Status Handlers
//!
//! One handler per target status. Each knows the statuses an order may move
//! from, how to find the order it acts on, its preconditions and the
//! mutation it applies. The dispatcher drives them in a fixed order and owns
//! the final status assignment and persistence.

use super::context::StateModel;
use super::errors::StateMachineResult;
use super::states::OrderStatus;
use crate::mapper::OrderMapper;
use crate::models::Order;
use crate::repository::OrderRepository;

pub mod canceled;
pub mod cooking;
pub mod created;
pub mod done;

pub use canceled::CanceledHandler;
pub use cooking::CookingHandler;
pub use created::CreatedHandler;
pub use done::DoneHandler;

/// Closed set of status handlers
#[derive(Debug, Clone)]
pub enum StatusHandler {
    Created(CreatedHandler),
    Cooking(CookingHandler),
    Done(DoneHandler),
    Canceled(CanceledHandler),
}

impl StatusHandler {
    /// The full handler set, one per status
    pub fn all(cooking_threshold: i64) -> Vec<Self> {
        vec![
            Self::Created(CreatedHandler),
            Self::Cooking(CookingHandler::new(cooking_threshold)),
            Self::Done(DoneHandler),
            Self::Canceled(CanceledHandler),
        ]
    }

    /// Status this handler transitions orders into
    pub fn status(&self) -> OrderStatus {
        match self {
            Self::Created(_) => OrderStatus::Created,
            Self::Cooking(_) => OrderStatus::Cooking,
            Self::Done(_) => OrderStatus::Done,
            Self::Canceled(_) => OrderStatus::Canceled,
        }
    }

    pub fn allowed_predecessors(&self) -> &'static [OrderStatus] {
        match self {
            Self::Created(_) => CreatedHandler::ALLOWED,
            Self::Cooking(_) => CookingHandler::ALLOWED,
            Self::Done(_) => DoneHandler::ALLOWED,
            Self::Canceled(_) => CanceledHandler::ALLOWED,
        }
    }

    /// An absent current order is never an allowed predecessor
    pub fn allows(&self, current: Option<OrderStatus>) -> bool {
        current.is_some_and(|status| self.allowed_predecessors().contains(&status))
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Created(_) => "Place a new order or send one back to the queue",
            Self::Cooking(_) => "Chef claims an order from the queue",
            Self::Done(_) => "Chef completes the order being cooked",
            Self::Canceled(_) => "Customer cancels a queued order",
        }
    }

    /// Populate `model.current` if it is not already set
    pub async fn retrieve_current(
        &self,
        model: &mut StateModel,
        repository: &dyn OrderRepository,
    ) -> StateMachineResult<()> {
        match self {
            Self::Cooking(handler) => handler.retrieve_current(model, repository).await,
            Self::Done(handler) => handler.retrieve_current(model, repository).await,
            Self::Created(_) | Self::Canceled(_) => retrieve_by_id(model, repository).await,
        }
    }

    /// `Ok(false)` means there is nothing to do; errors reject the request
    pub async fn validate(
        &self,
        model: &StateModel,
        repository: &dyn OrderRepository,
    ) -> StateMachineResult<bool> {
        match self {
            Self::Created(handler) => handler.validate(model),
            Self::Cooking(handler) => handler.validate(model, repository).await,
            Self::Done(handler) => handler.validate(model),
            Self::Canceled(handler) => handler.validate(model),
        }
    }

    /// Produce the order to persist. The status is assigned by the caller.
    pub fn handle_state(
        &self,
        model: &mut StateModel,
        mapper: &OrderMapper,
    ) -> StateMachineResult<Order> {
        match self {
            Self::Created(handler) => handler.handle_state(model, mapper),
            Self::Cooking(handler) => handler.handle_state(model, mapper),
            Self::Done(_) | Self::Canceled(_) => take_current(model),
        }
    }
}

/// Default lookup: by the model's id, when one was given
pub(crate) async fn retrieve_by_id(
    model: &mut StateModel,
    repository: &dyn OrderRepository,
) -> StateMachineResult<()> {
    if model.current.is_some() {
        return Ok(());
    }
    if let Some(id) = model.id {
        model.current = repository.find_by_id(id).await?;
    }
    Ok(())
}

/// Move the snapshot out of the model unchanged
pub(crate) fn take_current(model: &mut StateModel) -> StateMachineResult<Order> {
    model
        .current
        .take()
        .ok_or_else(|| super::errors::internal_error("No current order to transition"))
}
