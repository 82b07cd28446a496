//! Kitchen properties and end-to-end shifts

use crate::common::fixtures::*;
use awesome_pizza::error::ErrorKind;
use awesome_pizza::models::OrderRequest;
use awesome_pizza::repository::OrderRepository;
use awesome_pizza::state_machine::{OrderStatus, StateModel};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_chef_cancel_is_forbidden() {
    let (_, machine) = machine([queued(42, 5)], 1);

    let model = StateModel::new(OrderRequest::for_chef(CHEF)).with_id(Some(42));
    let err = assert_err!(machine.handle_state(OrderStatus::Canceled, model).await);
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_create_without_pizzas_is_bad_request() {
    let (_, machine) = machine(Vec::new(), 1);

    let model = StateModel::new(OrderRequest::for_customer(CUSTOMER, Vec::new()));
    let err = assert_err!(machine.handle_state(OrderStatus::Created, model).await);
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn test_capacity_admission() {
    let (_, machine) = machine([cooking(1, CHEF, 60), queued(2, 30)], 1);

    let model = StateModel::new(OrderRequest::for_chef(CHEF));
    let err = assert_err!(machine.handle_state(OrderStatus::Cooking, model).await);
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let model = StateModel::new(OrderRequest::for_chef(OTHER_CHEF));
    let dto = assert_ok!(machine.handle_state(OrderStatus::Cooking, model).await).unwrap();
    assert_eq!(dto.id, Some(2));
    assert_eq!(dto.chef_id, Some(OTHER_CHEF));
}

#[tokio::test]
async fn test_done_by_other_chef_is_bad_request() {
    let (_, machine) = machine([cooking(42, CHEF, 5)], 1);

    let model = StateModel::new(OrderRequest::for_chef(OTHER_CHEF)).with_id(Some(42));
    let err = assert_err!(machine.handle_state(OrderStatus::Done, model).await);
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn test_oldest_queued_order_is_claimed_first() {
    let (_, machine) = machine([queued(2, 10), queued(1, 20)], 1);

    let dto = assert_ok!(
        machine
            .handle_state(OrderStatus::Cooking, StateModel::new(OrderRequest::for_chef(CHEF)))
            .await
    )
    .unwrap();
    assert_eq!(dto.id, Some(1));
}

#[tokio::test]
async fn test_cancel_twice_is_bad_request() {
    let (_, machine) = machine([order(7, OrderStatus::Canceled, None, 5)], 1);

    let model = StateModel::new(OrderRequest::default()).with_id(Some(7));
    let err = assert_err!(machine.handle_state(OrderStatus::Canceled, model).await);
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn test_cook_complete_and_claim_next_shift() {
    // 43 has waited longest of the orders still pending after 42
    let (repo, kitchen) = service([queued(42, 60), queued(43, 30), queued(44, 10)], 1);

    let cooking = assert_ok!(
        kitchen
            .update_order(42, OrderRequest::default().with_status(OrderStatus::Cooking), Some(CHEF))
            .await
    );
    assert_eq!(cooking.id, Some(42));
    assert_eq!(cooking.status, OrderStatus::Cooking);
    assert_eq!(cooking.chef_id, Some(CHEF));

    let done = assert_ok!(
        kitchen
            .update_order(42, OrderRequest::default().with_status(OrderStatus::Done), Some(CHEF))
            .await
    );
    assert_eq!(done.status, OrderStatus::Done);

    let next = assert_ok!(kitchen.take_next(CHEF, None).await).expect("43 is pending");
    assert_eq!(next.id, Some(43));
    assert_eq!(next.status, OrderStatus::Cooking);
    assert_eq!(next.chef_id, Some(CHEF));

    let finished = repo.find_by_id(42).await.unwrap().unwrap();
    assert_eq!(finished.status, OrderStatus::Done);
    assert_eq!(finished.version, 2);
}

#[tokio::test]
async fn test_claim_next_with_empty_queue() {
    let (repo, kitchen) = service([cooking(1, CHEF, 60)], 1);

    let next = assert_ok!(kitchen.take_next(CHEF, None).await);
    assert!(next.is_none());

    // the DONE half still committed
    let finished = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(finished.status, OrderStatus::Done);

    let (repo, idle) = service(Vec::new(), 1);
    assert!(assert_ok!(idle.take_next(CHEF, None).await).is_none());
    assert!(repo.is_empty());
}
