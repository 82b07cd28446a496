//! # Pizza Kitchen
//!
//! Walks a short kitchen shift: customers place orders, a chef cooks and
//! completes them, a customer cancels one and the chef keeps claiming work
//! until the queue is empty.
//!
//! Runs against the in-memory store by default. Set
//! `PIZZA_KITCHEN_STORE=postgres` to use the configured database instead.

use anyhow::{Context, Result};
use awesome_pizza::config::{ConfigManager, PizzaConfig};
use awesome_pizza::logging::init_structured_logging;
use awesome_pizza::models::{OrderRequest, Pizza};
use awesome_pizza::repository::{InMemoryOrderRepository, OrderRepository};
use awesome_pizza::services::OrderService;
use awesome_pizza::state_machine::OrderStatus;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

const CHEF: i64 = 5;

fn menu() -> Vec<Pizza> {
    vec![
        Pizza::new(1, "Margherita", "Tomato, mozzarella, basil", Decimal::new(750, 2)),
        Pizza::new(2, "Diavola", "Tomato, mozzarella, spicy salami", Decimal::new(900, 2)),
        Pizza::new(3, "Marinara", "Tomato, garlic, oregano", Decimal::new(600, 2)),
    ]
}

#[cfg(feature = "postgres")]
async fn postgres_store(config: &PizzaConfig) -> Result<Arc<dyn OrderRepository>> {
    use awesome_pizza::database;
    use awesome_pizza::repository::PgOrderRepository;

    let pool = database::connect(&config.database)
        .await
        .context("failed to connect to the order database")?;
    database::run_migrations(&pool).await?;

    for pizza in menu() {
        sqlx::query(
            "INSERT INTO pizzas (id, name, description, price) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(pizza.id)
        .bind(pizza.name)
        .bind(pizza.description)
        .bind(pizza.price)
        .execute(&pool)
        .await?;
    }

    Ok(Arc::new(PgOrderRepository::new(pool)))
}

async fn order_store(config: &PizzaConfig) -> Result<Arc<dyn OrderRepository>> {
    if std::env::var("PIZZA_KITCHEN_STORE").as_deref() == Ok("postgres") {
        #[cfg(feature = "postgres")]
        return postgres_store(config).await;

        #[cfg(not(feature = "postgres"))]
        anyhow::bail!("built without the postgres feature");
    }

    let _ = config;
    Ok(Arc::new(InMemoryOrderRepository::with_catalog(menu())))
}

#[tokio::main]
async fn main() -> Result<()> {
    let manager = ConfigManager::load().context("failed to load configuration")?;
    let config = manager.config();
    init_structured_logging(&config.logging);
    info!(
        environment = manager.environment(),
        threshold = config.kitchen.cooking_threshold,
        "Kitchen opening"
    );

    let service = OrderService::new(order_store(config).await?, &config.kitchen);

    let first = service
        .create_order(OrderRequest::for_customer(1, vec![1, 2]))
        .await?;
    let second = service
        .create_order(OrderRequest::for_customer(2, vec![3]))
        .await?;
    let doomed = service
        .create_order(OrderRequest::for_customer(3, vec![1]))
        .await?;
    info!(
        first = ?first.code,
        second = ?second.code,
        doomed = ?doomed.code,
        "Orders placed"
    );

    let cooking = service
        .update_order(
            first.id.context("saved order has no id")?,
            OrderRequest::default().with_status(OrderStatus::Cooking),
            Some(CHEF),
        )
        .await?;
    info!(order = ?cooking.code, total = ?cooking.total_amount, "Chef started cooking");

    let canceled = service
        .update_order(
            doomed.id.context("saved order has no id")?,
            OrderRequest::default().with_status(OrderStatus::Canceled),
            None,
        )
        .await?;
    info!(order = ?canceled.code, "Customer canceled");

    while let Some(next) = service.take_next(CHEF, None).await? {
        info!(order = ?next.code, "Chef claimed next order");
    }

    let finished = service.find_all_orders(Some(&[OrderStatus::Done])).await?;
    let pending = service
        .find_all_orders(Some(&[OrderStatus::Created, OrderStatus::Cooking]))
        .await?;
    info!(
        done = finished.len(),
        pending = pending.len(),
        "Kitchen closed"
    );

    Ok(())
}
