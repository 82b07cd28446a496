//! In-process order store.

use super::OrderRepository;
use crate::models::{Order, Pizza};
use crate::state_machine::errors::{PersistenceError, PersistenceResult};
use crate::state_machine::states::OrderStatus;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// First code handed out, mirroring the database sequence start
pub const FIRST_ORDER_CODE: i64 = 1000;

#[derive(Debug)]
struct Store {
    orders: BTreeMap<i64, Order>,
    next_id: i64,
    next_code: i64,
}

/// Thread-safe in-memory implementation of [`OrderRepository`]
#[derive(Debug)]
pub struct InMemoryOrderRepository {
    store: RwLock<Store>,
    catalog: HashMap<i64, Pizza>,
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::with_catalog(Vec::new())
    }

    /// Store that hydrates pizza references from the given catalog
    pub fn with_catalog(pizzas: Vec<Pizza>) -> Self {
        Self {
            store: RwLock::new(Store {
                orders: BTreeMap::new(),
                next_id: 1,
                next_code: FIRST_ORDER_CODE,
            }),
            catalog: pizzas.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Insert an order exactly as given, keeping its id, code, version and
    /// timestamps. Sequences are advanced past the inserted values.
    pub fn insert_raw(&self, mut order: Order) -> PersistenceResult<Order> {
        let id = order.id.ok_or_else(|| PersistenceError::InvalidData {
            field: "id".to_string(),
        })?;
        self.hydrate(&mut order.pizzas);

        let mut store = self.store.write();
        store.next_id = store.next_id.max(id + 1);
        if let Some(code) = order.code {
            store.next_code = store.next_code.max(code + 1);
        }
        store.orders.insert(id, order.clone());
        Ok(order)
    }

    pub fn len(&self) -> usize {
        self.store.read().orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().orders.is_empty()
    }

    fn hydrate(&self, pizzas: &mut [Pizza]) {
        for pizza in pizzas.iter_mut() {
            if let Some(entry) = self.catalog.get(&pizza.id) {
                *pizza = entry.clone();
            }
        }
    }

    fn sorted_by_created(orders: impl Iterator<Item = Order>) -> Vec<Order> {
        let mut orders: Vec<Order> = orders.collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        orders
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: i64) -> PersistenceResult<Option<Order>> {
        Ok(self.store.read().orders.get(&id).cloned())
    }

    async fn find_by_code(&self, code: i64) -> PersistenceResult<Option<Order>> {
        Ok(self
            .store
            .read()
            .orders
            .values()
            .find(|o| o.code == Some(code))
            .cloned())
    }

    async fn find_all_sorted_by_created_date(
        &self,
        statuses: &[OrderStatus],
    ) -> PersistenceResult<Vec<Order>> {
        let store = self.store.read();
        Ok(Self::sorted_by_created(
            store
                .orders
                .values()
                .filter(|o| statuses.contains(&o.status))
                .cloned(),
        ))
    }

    async fn find_cooking_order(&self, chef_id: i64) -> PersistenceResult<Option<Order>> {
        let store = self.store.read();
        Ok(Self::sorted_by_created(
            store
                .orders
                .values()
                .filter(|o| o.status == OrderStatus::Cooking && o.chef_id == Some(chef_id))
                .cloned(),
        )
        .into_iter()
        .next())
    }

    async fn can_take_any_order(&self, chef_id: i64, threshold: i64) -> PersistenceResult<bool> {
        let cooking = self
            .store
            .read()
            .orders
            .values()
            .filter(|o| o.status == OrderStatus::Cooking && o.chef_id == Some(chef_id))
            .count();

        Ok((cooking as i64) < threshold)
    }

    async fn save(&self, mut order: Order) -> PersistenceResult<Order> {
        self.hydrate(&mut order.pizzas);
        let now = Utc::now();

        let mut store = self.store.write();
        match order.id {
            Some(id) => {
                let stored = store
                    .orders
                    .get(&id)
                    .ok_or(PersistenceError::NotFound { id })?;
                if stored.version != order.version {
                    return Err(PersistenceError::ConcurrentModification { entity_id: id });
                }

                // code and creation time are immutable once assigned
                order.code = stored.code;
                order.created_at = stored.created_at;
            }
            None => {
                let id = store.next_id;
                let code = store.next_code;
                store.next_id += 1;
                store.next_code += 1;

                order.id = Some(id);
                order.code = Some(code);
                order.created_at = now;
            }
        }

        order.version += 1;
        order.updated_at = now;

        if let Some(id) = order.id {
            store.orders.insert(id, order.clone());
        }
        Ok(order)
    }
}
