//! # Order Repository
//!
//! Storage capability consumed by the state machine and the order service.
//! Two implementations ship with the crate: an in-process store used by tests
//! and the demo binary, and a PostgreSQL store behind the `postgres` feature.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use crate::models::Order;
use crate::state_machine::errors::PersistenceResult;
use crate::state_machine::states::OrderStatus;
use async_trait::async_trait;

pub use memory::InMemoryOrderRepository;
#[cfg(feature = "postgres")]
pub use postgres::PgOrderRepository;

/// Trait for order lookup and persistence
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order by its id
    async fn find_by_id(&self, id: i64) -> PersistenceResult<Option<Order>>;

    /// Find an order by its human-facing code
    async fn find_by_code(&self, code: i64) -> PersistenceResult<Option<Order>>;

    /// Orders in any of the given statuses, oldest first
    async fn find_all_sorted_by_created_date(
        &self,
        statuses: &[OrderStatus],
    ) -> PersistenceResult<Vec<Order>>;

    /// The COOKING order owned by a chef, if any. At most one is expected.
    async fn find_cooking_order(&self, chef_id: i64) -> PersistenceResult<Option<Order>>;

    /// True when the chef has strictly fewer than `threshold` COOKING orders
    async fn can_take_any_order(&self, chef_id: i64, threshold: i64) -> PersistenceResult<bool>;

    /// Insert or update an order. The first save assigns id, code and
    /// creation time; every save bumps `version` and `updated_at`. A stale
    /// `version` fails with `ConcurrentModification`.
    async fn save(&self, order: Order) -> PersistenceResult<Order>;
}
