//! Live table bills for one tenant.

use crate::clients::OrderClient;
use crate::model::{TableRef, TenantId};
use crate::order_actor::OrderError;
use crate::pipeline::bills::{open_bills, TableBill};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Keeps the tenant's open bills current.
///
/// A background task follows the tenant's open orders and recomputes the
/// bills on every change. Dropping the board stops the task.
pub struct BillBoard {
    receiver: watch::Receiver<Vec<TableBill>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl BillBoard {
    /// Subscribes to the tenant's open orders. Returns once the first set of
    /// bills is known.
    pub async fn start(orders: &OrderClient, tenant_id: TenantId) -> Result<Self, OrderError> {
        let cancel = CancellationToken::new();
        let mut subscription = orders
            .watch_open_orders(tenant_id)
            .await?
            .bind(cancel.child_token());
        let initial = subscription
            .next()
            .await
            .map(|snapshot| open_bills(&snapshot))
            .ok_or_else(|| OrderError::ActorCommunicationError("order collection closed".into()))?;
        let (sender, receiver) = watch::channel(initial);

        let task = tokio::spawn(async move {
            info!(%tenant_id, "Bill board started");
            while let Some(snapshot) = subscription.next().await {
                let bills = open_bills(&snapshot);
                debug!(%tenant_id, tables = bills.len(), "Bills recomputed");
                sender.send_if_modified(|current| {
                    if *current == bills {
                        return false;
                    }
                    *current = bills;
                    true
                });
            }
            info!(%tenant_id, "Bill board stopped");
        });

        Ok(Self {
            receiver,
            cancel,
            task: Some(task),
        })
    }

    pub fn bills(&self) -> Vec<TableBill> {
        (*self.receiver.borrow()).clone()
    }

    pub fn bill(&self, table: &TableRef) -> Option<TableBill> {
        self.receiver.borrow().iter().find(|b| &b.table == table).cloned()
    }

    /// Waits for the next change. `None` once the board stopped.
    pub async fn changed(&mut self) -> Option<Vec<TableBill>> {
        self.receiver.changed().await.ok()?;
        Some((*self.receiver.borrow_and_update()).clone())
    }

    /// Waits until the bills satisfy `predicate`.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&Vec<TableBill>) -> bool) -> Option<Vec<TableBill>> {
        self.receiver.wait_for(predicate).await.ok().map(|bills| (*bills).clone())
    }

    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for BillBoard {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
