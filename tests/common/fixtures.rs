//! Kitchen fixtures: a priced menu, seeded stores and ready-made machines.

use awesome_pizza::config::KitchenConfig;
use awesome_pizza::models::{Order, Pizza};
use awesome_pizza::repository::InMemoryOrderRepository;
use awesome_pizza::services::OrderService;
use awesome_pizza::state_machine::{OrderStateMachine, OrderStatus};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

pub const CHEF: i64 = 5;
pub const OTHER_CHEF: i64 = 6;
pub const CUSTOMER: i64 = 1;

pub fn menu() -> Vec<Pizza> {
    vec![
        Pizza::new(1, "Margherita", "Tomato, mozzarella, basil", Decimal::new(750, 2)),
        Pizza::new(2, "Diavola", "Tomato, mozzarella, spicy salami", Decimal::new(900, 2)),
        Pizza::new(3, "Marinara", "Tomato, garlic, oregano", Decimal::new(600, 2)),
    ]
}

/// Order with a fixed id and a creation time `minutes_ago` in the past
pub fn order(id: i64, status: OrderStatus, chef_id: Option<i64>, minutes_ago: i64) -> Order {
    let mut order = Order::new(Some(CUSTOMER), vec![Pizza::reference(1), Pizza::reference(2)]);
    order.id = Some(id);
    order.code = Some(1000 + id);
    order.status = status;
    order.chef_id = chef_id;
    order.created_at = Utc::now() - Duration::minutes(minutes_ago);
    order.updated_at = order.created_at;
    order
}

pub fn queued(id: i64, minutes_ago: i64) -> Order {
    order(id, OrderStatus::Created, None, minutes_ago)
}

pub fn cooking(id: i64, chef_id: i64, minutes_ago: i64) -> Order {
    order(id, OrderStatus::Cooking, Some(chef_id), minutes_ago)
}

pub fn store(orders: impl IntoIterator<Item = Order>) -> Arc<InMemoryOrderRepository> {
    let repo = Arc::new(InMemoryOrderRepository::with_catalog(menu()));
    for order in orders {
        repo.insert_raw(order).expect("seed order");
    }
    repo
}

pub fn machine(
    orders: impl IntoIterator<Item = Order>,
    threshold: i64,
) -> (Arc<InMemoryOrderRepository>, OrderStateMachine) {
    let repo = store(orders);
    let machine = OrderStateMachine::new(repo.clone(), threshold);
    (repo, machine)
}

pub fn service(
    orders: impl IntoIterator<Item = Order>,
    threshold: i64,
) -> (Arc<InMemoryOrderRepository>, OrderService) {
    let repo = store(orders);
    let service = OrderService::new(
        repo.clone(),
        &KitchenConfig {
            cooking_threshold: threshold,
        },
    );
    (repo, service)
}
