//! Dispatcher protocol tests: input checks, handler lookup, silent no-ops,
//! predecessor checks and persistence of the forced target status.

use crate::common::fixtures::*;
use awesome_pizza::error::ErrorKind;
use awesome_pizza::models::OrderRequest;
use awesome_pizza::repository::{InMemoryOrderRepository, OrderRepository};
use awesome_pizza::state_machine::handlers::{CanceledHandler, StatusHandler};
use awesome_pizza::state_machine::{
    OrderStateMachine, OrderStatus, StateMachineError, StateModel,
};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_missing_target_status() {
    let (_, machine) = machine([queued(1, 5)], 1);

    let err = assert_err!(
        machine
            .handle_state(None, StateModel::new(OrderRequest::for_chef(CHEF)))
            .await
    );
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn test_missing_request() {
    let (repo, machine) = machine([queued(1, 5)], 1);

    let err = assert_err!(
        machine
            .handle_state(OrderStatus::Canceled, StateModel::empty().with_id(Some(1)))
            .await
    );
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let untouched = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(untouched.status, OrderStatus::Created);
}

#[tokio::test]
async fn test_status_without_handler_is_internal_error() {
    let repo = Arc::new(InMemoryOrderRepository::new());
    let machine =
        OrderStateMachine::with_handlers(repo, [StatusHandler::Canceled(CanceledHandler)]);

    let err = assert_err!(
        machine
            .handle_state(OrderStatus::Done, StateModel::new(OrderRequest::for_chef(CHEF)))
            .await
    );
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[tokio::test]
async fn test_false_validation_returns_empty_without_writes() {
    let (repo, machine) = machine([cooking(1, OTHER_CHEF, 30)], 1);

    // empty queue
    let claimed = assert_ok!(
        machine
            .handle_state(OrderStatus::Cooking, StateModel::new(OrderRequest::for_chef(CHEF)))
            .await
    );
    assert!(claimed.is_none());

    // nothing cooking for this chef
    let finished = assert_ok!(
        machine
            .handle_state(OrderStatus::Done, StateModel::new(OrderRequest::for_chef(CHEF)))
            .await
    );
    assert!(finished.is_none());

    let stored = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.version, 0);
    assert_eq!(stored.status, OrderStatus::Cooking);
}

#[tokio::test]
async fn test_validation_errors_propagate_unchanged() {
    let (repo, machine) = machine([queued(1, 5)], 1);

    let err = assert_err!(
        machine
            .handle_state(
                OrderStatus::Canceled,
                StateModel::new(OrderRequest::for_chef(CHEF)).with_id(Some(1)),
            )
            .await
    );
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().version, 0);
}

#[tokio::test]
async fn test_incompatible_current_status() {
    let (_, machine) = machine([order(1, OrderStatus::Done, Some(CHEF), 60)], 1);

    let err = assert_err!(
        machine
            .handle_state(
                OrderStatus::Canceled,
                StateModel::new(OrderRequest::default()).with_id(Some(1)),
            )
            .await
    );

    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(matches!(
        err,
        StateMachineError::InvalidTransition {
            from: Some(OrderStatus::Done),
            to: OrderStatus::Canceled,
        }
    ));
    assert!(err.to_string().contains("[CANCELED]"));
    assert!(err.to_string().contains("[DONE]"));
}

#[tokio::test]
async fn test_absent_current_order_fails_predecessor_check() {
    let (repo, machine) = machine(Vec::new(), 1);

    // CREATED accepts a missing order in validation, then trips the
    // predecessor check since "no order" is not an allowed status
    let err = assert_err!(
        machine
            .handle_state(
                OrderStatus::Created,
                StateModel::new(OrderRequest::for_customer(CUSTOMER, vec![1])),
            )
            .await
    );
    assert!(matches!(
        err,
        StateMachineError::InvalidTransition { from: None, .. }
    ));
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_dispatcher_assigns_target_status_and_persists() {
    let (repo, machine) = machine([cooking(1, CHEF, 10)], 1);

    let dto = assert_ok!(
        machine
            .handle_state(
                OrderStatus::Created,
                StateModel::new(OrderRequest::for_chef(CHEF)).with_id(Some(1)),
            )
            .await
    )
    .expect("order restored");

    assert_eq!(dto.status, OrderStatus::Created);
    assert_eq!(dto.chef_id, None);
    assert_eq!(dto.code, Some(1001));

    let stored = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Created);
    assert_eq!(stored.version, 1);
}

#[tokio::test]
async fn test_output_carries_total_amount() {
    let (_, machine) = machine([queued(1, 5)], 1);

    let dto = assert_ok!(
        machine
            .handle_state(OrderStatus::Cooking, StateModel::new(OrderRequest::for_chef(CHEF)))
            .await
    )
    .expect("order claimed");

    // Margherita 7.50 + Diavola 9.00, hydrated from the menu on save
    assert_eq!(dto.total_amount, Some(rust_decimal::Decimal::new(1650, 2)));
    assert!(dto.pizzas.iter().all(|p| p.is_hydrated()));
}

#[tokio::test]
async fn test_stale_snapshot_is_conflict() {
    let (repo, machine) = machine([queued(1, 5)], 1);

    let snapshot = repo.find_by_id(1).await.unwrap().unwrap();
    let mut newer = snapshot.clone();
    newer.pizzas.truncate(1);
    repo.save(newer).await.unwrap();

    let err = assert_err!(
        machine
            .handle_state(
                OrderStatus::Cooking,
                StateModel::new(OrderRequest::for_chef(CHEF)).with_current(snapshot),
            )
            .await
    );
    assert_eq!(err.kind(), ErrorKind::Conflict);
}
