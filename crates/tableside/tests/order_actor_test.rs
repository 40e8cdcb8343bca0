use doc_framework::mock::{create_mock_client, MockClient};
use doc_framework::{CollectionRequest, DocumentClient, StoreError, Subscription};
use rust_decimal::Decimal;
use tableside::clients::{OrderClient, TenantClient};
use tableside::model::{
    LineItem, Order, OrderCreate, OrderId, OrderStatus, SubscriptionStatus, TableRef, Tenant, TenantId,
};
use tableside::order_actor::{self, AdvanceOutcome, ConcurrencyMode, OrderActionResult, OrderContext, OrderError};
use tableside::pipeline::{BillBoard, TableBill};

fn tenant(id: u32) -> Tenant {
    Tenant {
        id: TenantId(id),
        business_name: "Corner Bistro".into(),
        plan_id: None,
        subscription_status: SubscriptionStatus::Active,
        billing_date: None,
    }
}

/// Real Order actor with a mocked tenant collection.
/// Exercises the validation in Order::on_create in isolation.
#[tokio::test]
async fn test_order_actor_with_mocked_tenants() {
    let mut tenant_mock = MockClient::<Tenant>::new();
    tenant_mock.expect_get(TenantId(1)).return_ok(Some(tenant(1)));
    tenant_mock.expect_get(TenantId(2)).return_ok(None);

    let (order_actor, orders) = order_actor::new(8);
    let order_client = OrderClient::new(orders, ConcurrencyMode::LastWriteWins);
    let tenants = TenantClient::new(tenant_mock.client());
    let actor_handle = tokio::spawn(order_actor.run(OrderContext::new(tenants)));

    let id = order_client
        .place_order(OrderCreate {
            tenant_id: TenantId(1),
            table: TableRef::new("T1"),
            items: vec![LineItem::new("tea", "Tea", 3, Decimal::new(250, 2))],
        })
        .await
        .expect("Order creation failed");
    let order = order_client.get(id).await.unwrap().unwrap();
    assert_eq!(order.total_amount, Some(Decimal::new(750, 2)));

    let rejected = order_client
        .place_order(OrderCreate {
            tenant_id: TenantId(2),
            table: TableRef::new("T1"),
            items: vec![],
        })
        .await;
    assert_eq!(rejected, Err(OrderError::InvalidTenant("tenant_2".into())));

    tenant_mock.verify();
    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_terminal_status_is_answered_locally() {
    let mock = MockClient::<Order>::new();
    let client = OrderClient::new(mock.client(), ConcurrencyMode::LastWriteWins);

    for status in [OrderStatus::Served, OrderStatus::Completed, OrderStatus::Cancelled] {
        let outcome = client.advance_status(OrderId(1), status).await.unwrap();
        assert_eq!(outcome, AdvanceOutcome::Terminal);
    }
    mock.verify();
}

#[tokio::test]
async fn test_advance_outcome_is_passed_through() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_action(OrderId(3))
        .return_ok(OrderActionResult::Advanced(AdvanceOutcome::Stale {
            current: OrderStatus::Served,
        }));
    let client = OrderClient::new(mock.client(), ConcurrencyMode::LastWriteWins);

    let outcome = client.advance_status(OrderId(3), OrderStatus::Ready).await.unwrap();
    assert_eq!(outcome, AdvanceOutcome::Stale { current: OrderStatus::Served });
    mock.verify();
}

#[tokio::test]
async fn test_settlement_errors_keep_their_type() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_batch().return_err(StoreError::EntityError(Box::new(OrderError::NotOpen {
        id: "order_2".into(),
        status: OrderStatus::Completed,
    })));
    mock.expect_batch().return_err(StoreError::NotFound("order_9".into()));
    mock.expect_batch().return_err(StoreError::ActorClosed);
    let client = OrderClient::new(mock.client(), ConcurrencyMode::LastWriteWins);

    let bill = TableBill {
        table: TableRef::new("T2"),
        order_ids: vec![OrderId(1), OrderId(2)],
        total: Decimal::new(1000, 2),
        count: 2,
    };
    assert!(matches!(
        client.settle_table(&bill).await,
        Err(OrderError::NotOpen { status: OrderStatus::Completed, .. })
    ));
    assert_eq!(
        client.settle_table(&bill).await,
        Err(OrderError::NotFound("order_9".into()))
    );
    assert!(matches!(
        client.settle_table(&bill).await,
        Err(OrderError::ActorCommunicationError(_))
    ));
    mock.verify();
}

#[tokio::test]
async fn test_settlement_reports_previous_statuses() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_batch().return_ok(vec![
        OrderActionResult::Settled { from: OrderStatus::Served },
        OrderActionResult::Settled { from: OrderStatus::Placed },
    ]);
    let client = OrderClient::new(mock.client(), ConcurrencyMode::LastWriteWins);

    let bill = TableBill {
        table: TableRef::new("T2"),
        order_ids: vec![OrderId(1), OrderId(2)],
        total: Decimal::new(1000, 2),
        count: 2,
    };
    let settlement = client.settle_table(&bill).await.unwrap();
    assert_eq!(settlement.settled[0].id, OrderId(1));
    assert_eq!(settlement.settled[1].from, OrderStatus::Placed);
    mock.verify();
}

/// The collection goes away between accepting the watch and sending the
/// first snapshot: the board must report it, not start empty.
#[tokio::test]
async fn test_bill_board_reports_closed_collection() {
    let (orders, mut requests) = create_mock_client::<Order>(4);
    let client = OrderClient::new(orders, ConcurrencyMode::LastWriteWins);

    let responder = tokio::spawn(async move {
        match requests.recv().await {
            Some(CollectionRequest::WatchQuery { respond_to, .. }) => {
                let (feed, subscription) = Subscription::<Vec<Order>>::channel();
                drop(feed);
                let _ = respond_to.send(Ok(subscription));
            }
            _ => panic!("Expected a query watch"),
        }
    });

    let result = BillBoard::start(&client, TenantId(1)).await;
    assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    responder.await.unwrap();
}
