//! Concurrent claims: per-chef admission and the oldest-order race

use crate::common::fixtures::*;
use awesome_pizza::error::ErrorKind;
use awesome_pizza::models::OrderRequest;
use awesome_pizza::repository::OrderRepository;
use awesome_pizza::state_machine::{OrderStatus, StateModel};
use futures::future::join_all;
use std::collections::HashSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_chef_never_exceeds_threshold() {
    let queue: Vec<_> = (1..=10).map(|id| queued(id, 100 - id)).collect();
    let (repo, machine) = machine(queue, 1);

    let claims = (0..8).map(|_| {
        let machine = machine.clone();
        tokio::spawn(async move {
            machine
                .handle_state(OrderStatus::Cooking, StateModel::new(OrderRequest::for_chef(CHEF)))
                .await
        })
    });
    let results: Vec<_> = join_all(claims)
        .await
        .into_iter()
        .map(|joined| joined.expect("claim task panicked"))
        .collect();

    let claimed = results.iter().filter(|r| matches!(r, Ok(Some(_)))).count();
    assert_eq!(claimed, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|err| err.kind() == ErrorKind::Conflict));

    let cooking = repo
        .find_all_sorted_by_created_date(&[OrderStatus::Cooking])
        .await
        .unwrap();
    assert_eq!(cooking.len(), 1);
    assert_eq!(cooking[0].chef_id, Some(CHEF));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_oldest_order_is_never_double_assigned() {
    let (repo, machine) = machine([queued(1, 30), queued(2, 20), queued(3, 10)], 1);

    let claims = (100..108).map(|chef_id| {
        let machine = machine.clone();
        tokio::spawn(async move {
            machine
                .handle_state(
                    OrderStatus::Cooking,
                    StateModel::new(OrderRequest::for_chef(chef_id)),
                )
                .await
        })
    });
    let results: Vec<_> = join_all(claims)
        .await
        .into_iter()
        .map(|joined| joined.expect("claim task panicked"))
        .collect();

    let mut claimed_ids = HashSet::new();
    for result in &results {
        match result {
            Ok(Some(dto)) => assert!(claimed_ids.insert(dto.id), "order claimed twice"),
            Ok(None) => {}
            Err(err) => assert_eq!(err.kind(), ErrorKind::Conflict),
        }
    }

    let cooking = repo
        .find_all_sorted_by_created_date(&[OrderStatus::Cooking])
        .await
        .unwrap();
    assert_eq!(cooking.len(), claimed_ids.len());

    let chefs: HashSet<_> = cooking.iter().map(|o| o.chef_id).collect();
    assert_eq!(chefs.len(), cooking.len());
}

#[tokio::test]
async fn test_claims_joined_on_one_task_pick_distinct_orders() {
    let (_, machine) = machine([queued(1, 30), queued(2, 20)], 1);

    let (first, second) = futures::join!(
        machine.handle_state(OrderStatus::Cooking, StateModel::new(OrderRequest::for_chef(CHEF))),
        machine.handle_state(
            OrderStatus::Cooking,
            StateModel::new(OrderRequest::for_chef(OTHER_CHEF))
        ),
    );

    let first = first.unwrap().unwrap();
    let second = second.unwrap().unwrap();
    assert_ne!(first.id, second.id);
}
