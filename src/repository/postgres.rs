//! PostgreSQL order store.
//!
//! Queries are checked at runtime so the crate builds without a live
//! database. Each save runs in its own transaction and updates conditionally
//! on the stored `version`.

use super::OrderRepository;
use crate::models::{Order, Pizza};
use crate::state_machine::errors::{PersistenceError, PersistenceResult};
use crate::state_machine::states::OrderStatus;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::collections::HashMap;

const ORDER_COLUMNS: &str =
    "id, code, status, chef_id, customer_id, version, created_at, updated_at";

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    code: i64,
    status: String,
    chef_id: Option<i64>,
    customer_id: Option<i64>,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct OrderPizzaRow {
    order_id: i64,
    id: i64,
    name: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
}

impl OrderRow {
    fn into_order(self, pizzas: Vec<Pizza>) -> PersistenceResult<Order> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|_| PersistenceError::InvalidData {
                field: format!("status '{}' of order {}", self.status, self.id),
            })?;

        Ok(Order {
            id: Some(self.id),
            code: Some(self.code),
            status,
            pizzas,
            chef_id: self.chef_id,
            customer_id: self.customer_id,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// sqlx-backed implementation of [`OrderRepository`]
#[derive(Debug, Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn load_pizzas(&self, order_ids: &[i64]) -> PersistenceResult<HashMap<i64, Vec<Pizza>>> {
        let rows = sqlx::query_as::<_, OrderPizzaRow>(
            r#"
            SELECT op.order_id, op.pizza_id AS id, p.name, p.description, p.price
            FROM order_pizzas op
            LEFT JOIN pizzas p ON p.id = op.pizza_id
            WHERE op.order_id = ANY($1)
            ORDER BY op.order_id, op.position
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: HashMap<i64, Vec<Pizza>> = HashMap::new();
        for row in rows {
            by_order.entry(row.order_id).or_default().push(Pizza {
                id: row.id,
                name: row.name,
                description: row.description,
                price: row.price,
            });
        }
        Ok(by_order)
    }

    async fn hydrate(&self, rows: Vec<OrderRow>) -> PersistenceResult<Vec<Order>> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut pizzas = self.load_pizzas(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let order_pizzas = pizzas.remove(&row.id).unwrap_or_default();
                row.into_order(order_pizzas)
            })
            .collect()
    }

    async fn hydrate_one(&self, row: Option<OrderRow>) -> PersistenceResult<Option<Order>> {
        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn replace_pizzas(
        tx: &mut Transaction<'_, Postgres>,
        order_id: i64,
        pizzas: &[Pizza],
    ) -> PersistenceResult<()> {
        sqlx::query("DELETE FROM order_pizzas WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut **tx)
            .await?;

        for (position, pizza) in pizzas.iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_pizzas (order_id, position, pizza_id) VALUES ($1, $2, $3)",
            )
            .bind(order_id)
            .bind(position as i32)
            .bind(pizza.id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_by_id(&self, id: i64) -> PersistenceResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        self.hydrate_one(row).await
    }

    async fn find_by_code(&self, code: i64) -> PersistenceResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        self.hydrate_one(row).await
    }

    async fn find_all_sorted_by_created_date(
        &self,
        statuses: &[OrderStatus],
    ) -> PersistenceResult<Vec<Order>> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE status = ANY($1) ORDER BY created_at ASC, id ASC"
        ))
        .bind(&statuses)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn find_cooking_order(&self, chef_id: i64) -> PersistenceResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE chef_id = $1 AND status = 'COOKING' \
             ORDER BY created_at ASC, id ASC LIMIT 1"
        ))
        .bind(chef_id)
        .fetch_optional(&self.pool)
        .await?;

        self.hydrate_one(row).await
    }

    async fn can_take_any_order(&self, chef_id: i64, threshold: i64) -> PersistenceResult<bool> {
        let allowed = sqlx::query_scalar::<_, bool>(
            "SELECT COUNT(1) < $2 FROM orders WHERE chef_id = $1 AND status = 'COOKING'",
        )
        .bind(chef_id)
        .bind(threshold)
        .fetch_one(&self.pool)
        .await?;

        Ok(allowed)
    }

    async fn save(&self, order: Order) -> PersistenceResult<Order> {
        let mut tx = self.pool.begin().await?;

        let row = match order.id {
            None => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "INSERT INTO orders (status, chef_id, customer_id, version, created_at, updated_at) \
                     VALUES ($1, $2, $3, 1, NOW(), NOW()) RETURNING {ORDER_COLUMNS}"
                ))
                .bind(order.status.as_str())
                .bind(order.chef_id)
                .bind(order.customer_id)
                .fetch_one(&mut *tx)
                .await?
            }
            Some(id) => {
                let updated = sqlx::query_as::<_, OrderRow>(&format!(
                    "UPDATE orders SET status = $2, chef_id = $3, version = version + 1, updated_at = NOW() \
                     WHERE id = $1 AND version = $4 RETURNING {ORDER_COLUMNS}"
                ))
                .bind(id)
                .bind(order.status.as_str())
                .bind(order.chef_id)
                .bind(order.version)
                .fetch_optional(&mut *tx)
                .await?;

                match updated {
                    Some(row) => row,
                    None => {
                        let exists = sqlx::query_scalar::<_, bool>(
                            "SELECT EXISTS (SELECT 1 FROM orders WHERE id = $1)",
                        )
                        .bind(id)
                        .fetch_one(&mut *tx)
                        .await?;

                        return Err(if exists {
                            PersistenceError::ConcurrentModification { entity_id: id }
                        } else {
                            PersistenceError::NotFound { id }
                        });
                    }
                }
            }
        };

        Self::replace_pizzas(&mut tx, row.id, &order.pizzas).await?;
        tx.commit().await?;

        let mut saved = self.hydrate(vec![row]).await?;
        saved.pop().ok_or_else(|| PersistenceError::InvalidData {
            field: "saved order".to_string(),
        })
    }
}
