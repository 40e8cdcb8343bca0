//! Document trait implementation for the Order domain type.
//!
//! Placing an order checks the tenant through the injected
//! [`OrderContext`] and computes the total from the line items. All later
//! changes arrive as [`OrderAction`]s.

use super::actions::{AdvanceOutcome, ConcurrencyMode, OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::clients::TenantClient;
use crate::model::{LineItem, Order, OrderCreate, OrderId, OrderStatus};
use async_trait::async_trait;
use chrono::Utc;
use doc_framework::{Document, DocumentClient};
use rust_decimal::Decimal;
use std::convert::Infallible;

/// Highest unit price accepted on a line item.
const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Highest quantity accepted on a line item.
const MAX_QUANTITY: u32 = 9999;

/// Collections the order hooks consult.
#[derive(Clone)]
pub struct OrderContext {
    pub tenants: TenantClient,
}

impl OrderContext {
    pub fn new(tenants: TenantClient) -> Self {
        Self { tenants }
    }
}

#[async_trait]
impl Document for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.table.0.trim().is_empty() {
            return Err(OrderError::ValidationError("table reference is empty".into()));
        }
        let total = order_total(&params.items)?;
        Ok(Self {
            id,
            tenant_id: params.tenant_id,
            table: params.table,
            items: params.items,
            total_amount: Some(total),
            status: OrderStatus::Placed,
            created_at: Utc::now(),
        })
    }

    /// Rejects orders for tenants that do not exist.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        match ctx.tenants.get(self.tenant_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(OrderError::InvalidTenant(self.tenant_id.to_string())),
            Err(e) => Err(OrderError::InvalidTenant(format!("{}: {e}", self.tenant_id))),
        }
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &OrderContext) -> Result<(), Self::Error> {
        match update {}
    }

    /// # Actions
    /// - `Advance`: forward one step, never backwards
    /// - `Settle`: any open status to Completed, fails otherwise
    /// - `Cancel`: Placed or In Progress to Cancelled, no-op otherwise
    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &OrderContext,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::Advance { observed, mode } => {
                Ok(OrderActionResult::Advanced(self.advance(observed, mode)))
            }
            OrderAction::Settle => {
                if !self.status.is_open() {
                    return Err(OrderError::NotOpen {
                        id: self.id.to_string(),
                        status: self.status,
                    });
                }
                let from = self.status;
                self.status = OrderStatus::Completed;
                Ok(OrderActionResult::Settled { from })
            }
            OrderAction::Cancel => {
                if !self.status.can_cancel() {
                    return Ok(OrderActionResult::Cancelled(false));
                }
                self.status = OrderStatus::Cancelled;
                Ok(OrderActionResult::Cancelled(true))
            }
        }
    }
}

fn validate_item(item: &LineItem) -> Result<(), OrderError> {
    if item.unit_price.is_sign_negative() {
        return Err(OrderError::ValidationError(format!(
            "{}: unit price must be non-negative, got {}",
            item.menu_item_id, item.unit_price
        )));
    }
    if item.unit_price > MAX_UNIT_PRICE {
        return Err(OrderError::ValidationError(format!(
            "{}: unit price exceeds {MAX_UNIT_PRICE}, got {}",
            item.menu_item_id, item.unit_price
        )));
    }
    if item.quantity == 0 || item.quantity > MAX_QUANTITY {
        return Err(OrderError::ValidationError(format!(
            "{}: quantity must be between 1 and {MAX_QUANTITY}, got {}",
            item.menu_item_id, item.quantity
        )));
    }
    Ok(())
}

/// Sum of the validated line subtotals.
fn order_total(items: &[LineItem]) -> Result<Decimal, OrderError> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        validate_item(item)?;
        item.subtotal()
            .and_then(|subtotal| total.checked_add(subtotal))
            .ok_or_else(|| OrderError::ValidationError(format!("order total overflows at {}", item.menu_item_id)))
    })
}

impl Order {
    fn advance(&mut self, observed: OrderStatus, mode: ConcurrencyMode) -> AdvanceOutcome {
        let current = self.status;
        if mode == ConcurrencyMode::ExpectPrior && current != observed {
            return AdvanceOutcome::Conflict { current };
        }
        let Some(target) = observed.next() else {
            return AdvanceOutcome::Terminal;
        };
        if target.stage() < current.stage() {
            return AdvanceOutcome::Stale { current };
        }
        self.status = target;
        AdvanceOutcome::Advanced {
            from: current,
            to: target,
        }
    }
}
