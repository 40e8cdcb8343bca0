use crate::model::{Order, OrderId, OrderStatus, TableRef};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// The unpaid orders of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBill {
    pub table: TableRef,
    pub order_ids: Vec<OrderId>,
    /// Sum of the orders' totals; a missing total counts as zero.
    pub total: Decimal,
    /// Every open order, including those without a usable total.
    pub count: usize,
}

impl TableBill {
    fn empty(table: TableRef) -> Self {
        Self {
            table,
            order_ids: Vec::new(),
            total: Decimal::ZERO,
            count: 0,
        }
    }

    fn add(&mut self, order: &Order) {
        self.order_ids.push(order.id);
        self.total = self.total.saturating_add(order.total_or_zero());
        self.count += 1;
    }
}

/// Groups the open orders by table, ordered by table label.
pub fn open_bills(orders: &[Order]) -> Vec<TableBill> {
    let mut bills: BTreeMap<&TableRef, TableBill> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.is_open()) {
        bills
            .entry(&order.table)
            .or_insert_with(|| TableBill::empty(order.table.clone()))
            .add(order);
    }
    bills.into_values().collect()
}

/// The bill for one table; an empty bill when it has no open orders.
pub fn bill_for(orders: &[Order], table: &TableRef) -> TableBill {
    let mut bill = TableBill::empty(table.clone());
    for order in orders.iter().filter(|o| o.is_open() && &o.table == table) {
        bill.add(order);
    }
    bill
}

/// Tables with at least one open order.
pub fn occupied_tables(orders: &[Order]) -> BTreeSet<TableRef> {
    orders
        .iter()
        .filter(|o| o.is_open())
        .map(|o| o.table.clone())
        .collect()
}

/// Settled takings: the totals of completed orders.
pub fn revenue(orders: &[Order]) -> Decimal {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .fold(Decimal::ZERO, |sum, o| sum.saturating_add(o.total_or_zero()))
}
