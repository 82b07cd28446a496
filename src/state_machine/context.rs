//! # Transition Context
//!
//! `StateModel` threads the requested id, the order snapshot and the
//! transition request through a single dispatcher call. It is built by the
//! caller per attempt, consumed by the state machine and never shared.

use super::errors::{bad_request, StateMachineResult};
use crate::models::{Order, OrderRequest};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct StateModel {
    /// Explicitly requested order, if any
    pub id: Option<i64>,

    /// Persisted order snapshot, populated lazily by the handler
    pub current: Option<Order>,

    /// What the caller asked for. Required; a model without one is rejected.
    pub request: Option<OrderRequest>,

    /// Correlation id attached to every log line of this transition
    pub correlation_id: Uuid,
}

impl StateModel {
    pub fn new(request: OrderRequest) -> Self {
        Self {
            id: None,
            current: None,
            request: Some(request),
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Model without a request; rejected by the state machine
    pub fn empty() -> Self {
        Self {
            id: None,
            current: None,
            request: None,
            correlation_id: Uuid::new_v4(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }

    /// Pre-populate the snapshot so no lookup happens
    #[must_use]
    pub fn with_current(mut self, order: Order) -> Self {
        self.current = Some(order);
        self
    }

    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    pub fn request(&self) -> StateMachineResult<&OrderRequest> {
        self.request
            .as_ref()
            .ok_or_else(|| bad_request("Invalid request for handling state"))
    }

    pub fn request_mut(&mut self) -> StateMachineResult<&mut OrderRequest> {
        self.request
            .as_mut()
            .ok_or_else(|| bad_request("Invalid request for handling state"))
    }

    /// Acting chef carried by the request
    pub fn chef_id(&self) -> Option<i64> {
        self.request.as_ref().and_then(|r| r.chef_id)
    }
}
