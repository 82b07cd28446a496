//! # Order Status State Machine
//!
//! Transitions between `CREATED`, `COOKING`, `DONE` and `CANCELED` are
//! driven by a dispatcher over a fixed set of per-status handlers.

pub mod chef_locks;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod order_state_machine;
pub mod states;

pub use chef_locks::ChefLocks;
pub use context::StateModel;
pub use errors::{PersistenceError, StateMachineError, StateMachineResult};
pub use handlers::StatusHandler;
pub use order_state_machine::OrderStateMachine;
pub use states::OrderStatus;
