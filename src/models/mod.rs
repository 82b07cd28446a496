//! # Data Models
//!
//! Order entity, its transition request and output representation, and the
//! pizza references an order carries.

pub mod order;
pub mod pizza;

pub use order::{Order, OrderDto, OrderRequest};
pub use pizza::Pizza;
