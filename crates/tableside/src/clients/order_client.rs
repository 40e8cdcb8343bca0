//! # Order Client
//!
//! Staff-facing operations on orders: placing, advancing, cancelling and
//! settling a table's bill. Reads are subscriptions on the tenant's orders
//! filtered by status.
use crate::clients::recover;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, TableRef, TenantId};
use crate::order_actor::{AdvanceOutcome, ConcurrencyMode, OrderAction, OrderActionResult, OrderError};
use crate::pipeline::TableBill;
use async_trait::async_trait;
use doc_framework::{CollectionClient, DocumentClient, Query, StoreError, Subscription};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Order actor.
///
/// Tenant validation and total computation happen in the Order actor's
/// `on_create` hook.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
    mode: ConcurrencyMode,
}

/// One order closed by a settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct SettledOrder {
    pub id: OrderId,
    pub from: OrderStatus,
}

/// Outcome of settling a table's bill.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub table: TableRef,
    pub settled: Vec<SettledOrder>,
    pub total: Decimal,
}

impl OrderClient {
    pub fn new(inner: CollectionClient<Order>, mode: ConcurrencyMode) -> Self {
        Self { inner, mode }
    }

    pub fn mode(&self) -> ConcurrencyMode {
        self.mode
    }

    #[instrument(skip(self))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("place_order called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Moves the order to the successor of `observed`.
    ///
    /// A terminal `observed` status is answered locally with
    /// [`AdvanceOutcome::Terminal`]; nothing is sent to the store.
    #[instrument(skip(self))]
    pub async fn advance_status(&self, id: OrderId, observed: OrderStatus) -> Result<AdvanceOutcome, OrderError> {
        if observed.next().is_none() {
            debug!("Observed status is terminal, nothing to do");
            return Ok(AdvanceOutcome::Terminal);
        }
        let action = OrderAction::Advance {
            observed,
            mode: self.mode,
        };
        match self.inner.perform_action(id, action).await.map_err(Self::map_error)? {
            OrderActionResult::Advanced(outcome) => {
                if !outcome.is_applied() {
                    info!(?outcome, "Advance not applied");
                }
                Ok(outcome)
            }
            other => Err(unexpected(other)),
        }
    }

    /// Returns `false` if the order was already past cancelling.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<bool, OrderError> {
        match self
            .inner
            .perform_action(id, OrderAction::Cancel)
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::Cancelled(done) => Ok(done),
            other => Err(unexpected(other)),
        }
    }

    /// Completes every order on the bill in one atomic batch.
    ///
    /// If any order is unknown or no longer open the whole settlement fails
    /// and no order changes. An empty bill settles without touching the store.
    #[instrument(skip(self, bill), fields(table = %bill.table))]
    pub async fn settle_table(&self, bill: &TableBill) -> Result<Settlement, OrderError> {
        if bill.order_ids.is_empty() {
            debug!("Empty bill, nothing to settle");
            return Ok(Settlement {
                table: bill.table.clone(),
                settled: Vec::new(),
                total: Decimal::ZERO,
            });
        }
        info!(orders = bill.order_ids.len(), "Settling table");
        let actions = bill
            .order_ids
            .iter()
            .map(|id| (*id, OrderAction::Settle))
            .collect();
        let results = self.inner.batch(actions).await.map_err(|e| {
            warn!(error = %e, "Settlement rejected");
            Self::map_error(e)
        })?;

        let mut settled = Vec::with_capacity(results.len());
        for (id, result) in bill.order_ids.iter().zip(results) {
            match result {
                OrderActionResult::Settled { from } => settled.push(SettledOrder { id: *id, from }),
                other => return Err(unexpected(other)),
            }
        }
        Ok(Settlement {
            table: bill.table.clone(),
            settled,
            total: bill.total,
        })
    }

    /// Live view of a tenant's orders in any of `statuses`.
    #[instrument(skip(self))]
    pub async fn watch_orders(
        &self,
        tenant_id: TenantId,
        statuses: &[OrderStatus],
    ) -> Result<Subscription<Vec<Order>>, OrderError> {
        let wanted = statuses.to_vec();
        let label = format!("{tenant_id} orders in {wanted:?}");
        let query = Query::new(label, move |order: &Order| {
            order.tenant_id == tenant_id && wanted.contains(&order.status)
        });
        self.inner.watch_query(query).await.map_err(Self::map_error)
    }

    /// Live view of the orders that make up the tenant's unpaid bills.
    pub async fn watch_open_orders(&self, tenant_id: TenantId) -> Result<Subscription<Vec<Order>>, OrderError> {
        self.watch_orders(tenant_id, &OrderStatus::OPEN).await
    }

    /// Current snapshot of a tenant's orders in any of `statuses`.
    pub async fn fetch_orders(&self, tenant_id: TenantId, statuses: &[OrderStatus]) -> Result<Vec<Order>, OrderError> {
        let mut subscription = self.watch_orders(tenant_id, statuses).await?;
        let snapshot = subscription.next().await;
        subscription.cancel();
        snapshot.ok_or_else(|| OrderError::ActorCommunicationError("order collection closed".into()))
    }
}

fn unexpected(result: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("Unexpected action result: {result:?}"))
}

#[async_trait]
impl DocumentClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &CollectionClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        recover(e, |e| match e {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            e => OrderError::ActorCommunicationError(e.to_string()),
        })
    }
}
