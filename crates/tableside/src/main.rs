//! # Tableside demo
//!
//! Runs one service shift against in-process collections: a tenant on a
//! plan, a barista session, a table's orders moving through the kitchen and
//! the table being settled.
//!
//! ```bash
//! RUST_LOG=info cargo run -p tableside
//! ```

use anyhow::Context;
use doc_framework::tracing::setup_tracing;
use rust_decimal::Decimal;
use tableside::config::PlatformConfig;
use tableside::lifecycle::PlatformSystem;
use tableside::model::{
    AuthCredential, LineItem, OrderCreate, OrderStatus, PlanCreate, ProfileCreate, Role, SubscriptionStatus,
    TableRef, TenantCreate, UserId,
};
use tableside::pipeline::{revenue, SalesSummary};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();

    let config = PlatformConfig::from_env();
    info!(?config, "Starting tableside");
    let system = PlatformSystem::new(config);

    let plan_id = system
        .plan_client
        .create_plan(PlanCreate {
            name: "Pro".into(),
            monthly_price: Decimal::new(4900, 2),
            table_quota: 0,
            features: vec!["Analytics".into(), "AI Sales Summary".into(), "Kitchen Display".into()],
        })
        .await?;
    let tenant_id = system
        .tenant_client
        .create_tenant(TenantCreate {
            business_name: "Corner Bistro".into(),
            plan_id: Some(plan_id),
            subscription_status: SubscriptionStatus::Active,
            billing_date: None,
        })
        .await?;
    let barista = UserId::from("barista-1");
    system
        .profile_client
        .create_profile(
            barista.clone(),
            ProfileCreate {
                display_name: "Robin".into(),
                role: Role::Barista,
                tenant_id: Some(tenant_id),
            },
        )
        .await?;

    let session = system.entitlements().start(AuthCredential::user(barista)).await;
    let entitlements = session.current();
    info!(
        role = %entitlements.role,
        analytics = entitlements.has_analytics(),
        kitchen_display = entitlements.has_kitchen_display(),
        "Session resolved"
    );

    let table = TableRef::new("T4");
    let board = system.bill_board(tenant_id).await?;
    let span = tracing::info_span!("service", %table);
    async {
        let latte = LineItem::new("latte", "Latte", 2, Decimal::new(450, 2)).with_customization("milk", "oat");
        let scone = LineItem::new("scone", "Scone", 1, Decimal::new(325, 2)).with_note("warm, please");
        for items in [vec![latte], vec![scone]] {
            let id = system
                .order_client
                .place_order(OrderCreate {
                    tenant_id,
                    table: table.clone(),
                    items,
                })
                .await?;
            let mut observed = OrderStatus::Placed;
            while let Some(next) = observed.next() {
                system.order_client.advance_status(id, observed).await?;
                observed = next;
            }
            info!(order_id = %id, status = %observed, "Order served");
        }
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    let bill = system
        .order_client
        .fetch_orders(tenant_id, &OrderStatus::OPEN)
        .await
        .map(|orders| tableside::pipeline::bill_for(&orders, &table))?;
    info!(total = %bill.total, orders = bill.count, tables = board.bills().len(), "Bill ready");

    let settlement = system.order_client.settle_table(&bill).await?;
    info!(total = %settlement.total, orders = settlement.settled.len(), "Table settled");

    let completed = system
        .order_client
        .fetch_orders(tenant_id, &[OrderStatus::Completed])
        .await?;
    let summary = SalesSummary::from_orders(&completed, 3);
    info!(
        revenue = %revenue(&completed),
        average = ?summary.average_ticket,
        best_seller = ?summary.top_items.first().map(|item| item.name.as_str()),
        "Shift summary"
    );

    board.shutdown().await;
    session.shutdown().await;
    system.shutdown().await.context("shutting down collections")?;
    info!("Application completed successfully");
    Ok(())
}
