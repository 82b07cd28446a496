//! Proptest strategies for order queues and menus

use proptest::collection::{hash_set, vec};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Distinct creation offsets, in minutes before now, for a queue of orders
pub fn creation_offsets_strategy() -> impl Strategy<Value = Vec<i64>> {
    hash_set(1i64..10_000, 1..12).prop_map(|offsets| offsets.into_iter().collect())
}

/// Menu prices in cents; `None` marks a pizza without a price
pub fn price_list_strategy() -> impl Strategy<Value = Vec<Option<i64>>> {
    vec(proptest::option::of(0i64..100_000), 0..16)
}

pub fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}
