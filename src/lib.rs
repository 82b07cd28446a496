#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Awesome Pizza
//!
//! Order lifecycle core for a pizza kitchen.
//!
//! ## Overview
//!
//! Orders move through `CREATED → COOKING → DONE`, may be sent back to the
//! queue by the chef cooking them, and may be `CANCELED` by the customer while
//! still queued. Every status change goes through a single dispatcher that
//! drives one handler per target status. Chefs claim the oldest queued order
//! and may cook at most a configured number of orders at once.
//!
//! ## Module Organization
//!
//! - [`state_machine`] - Status handlers, dispatcher and per-chef admission locks
//! - [`models`] - Orders, pizzas, transition requests and output representation
//! - [`mapper`] - Request/order/output conversions
//! - [`repository`] - Order store trait with in-memory and PostgreSQL backends
//! - [`services`] - Create, read, update and claim-next operations
//! - [`config`] - Layered configuration management
//! - [`logging`] - Structured logging setup
//! - [`error`] - Error kinds shared across layers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use awesome_pizza::config::KitchenConfig;
//! use awesome_pizza::models::OrderRequest;
//! use awesome_pizza::repository::InMemoryOrderRepository;
//! use awesome_pizza::services::OrderService;
//! use std::sync::Arc;
//!
//! # async fn example() -> awesome_pizza::Result<()> {
//! let service = OrderService::new(
//!     Arc::new(InMemoryOrderRepository::new()),
//!     &KitchenConfig::default(),
//! );
//!
//! let placed = service
//!     .create_order(OrderRequest::for_customer(1, vec![1, 2]))
//!     .await?;
//! let cooking = service.take_next(5, None).await?;
//! assert_eq!(cooking.and_then(|o| o.id), placed.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit and integration tests
//! ```

pub mod config;
pub mod constants;
#[cfg(feature = "postgres")]
pub mod database;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod models;
pub mod repository;
pub mod services;
pub mod state_machine;

pub use config::{ConfigManager, DatabaseConfig, KitchenConfig, LoggingConfig, PizzaConfig};
pub use error::{ErrorKind, PizzaError, Result};
pub use mapper::OrderMapper;
pub use models::{Order, OrderDto, OrderRequest, Pizza};
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use services::OrderService;
pub use state_machine::{
    OrderStateMachine, OrderStatus, StateMachineError, StateModel, StatusHandler,
};
