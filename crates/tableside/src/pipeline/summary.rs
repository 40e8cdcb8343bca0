use crate::model::{Order, OrderStatus};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Units sold of one menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSales {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
}

/// Reporting snapshot over a set of orders.
///
/// This is what the sales-summary assistant is fed; only completed orders
/// count towards sales.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub completed_orders: usize,
    pub open_orders: usize,
    pub revenue: Decimal,
    /// Revenue per completed order, rounded to cents.
    pub average_ticket: Option<Decimal>,
    /// Best sellers first; ties broken by menu item id.
    pub top_items: Vec<ItemSales>,
}

impl SalesSummary {
    pub fn from_orders(orders: &[Order], top_n: usize) -> Self {
        let completed: Vec<&Order> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .collect();
        let revenue = completed
            .iter()
            .fold(Decimal::ZERO, |sum, o| sum.saturating_add(o.total_or_zero()));
        let average_ticket = if completed.is_empty() {
            None
        } else {
            Some((revenue / Decimal::from(completed.len() as u64)).round_dp(2))
        };

        let mut sold: HashMap<&str, ItemSales> = HashMap::new();
        for item in completed.iter().flat_map(|o| o.items.iter()) {
            let entry = sold.entry(item.menu_item_id.as_str()).or_insert_with(|| ItemSales {
                menu_item_id: item.menu_item_id.clone(),
                name: item.name.clone(),
                quantity: 0,
            });
            entry.quantity = entry.quantity.saturating_add(item.quantity);
        }
        let mut top_items: Vec<ItemSales> = sold.into_values().collect();
        top_items.sort_by(|a, b| {
            b.quantity
                .cmp(&a.quantity)
                .then_with(|| a.menu_item_id.cmp(&b.menu_item_id))
        });
        top_items.truncate(top_n);

        Self {
            completed_orders: completed.len(),
            open_orders: orders.iter().filter(|o| o.is_open()).count(),
            revenue,
            average_ticket,
            top_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, OrderId, TableRef, TenantId};
    use chrono::Utc;

    fn order(id: u32, status: OrderStatus, items: Vec<LineItem>) -> Order {
        let total = items.iter().filter_map(LineItem::subtotal).sum();
        Order {
            id: OrderId(id),
            tenant_id: TenantId(1),
            table: TableRef::new("T1"),
            items,
            total_amount: Some(total),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_ranks_items_from_completed_orders() {
        let latte = |qty| LineItem::new("latte", "Latte", qty, Decimal::new(450, 2));
        let scone = |qty| LineItem::new("scone", "Scone", qty, Decimal::new(300, 2));
        let orders = vec![
            order(1, OrderStatus::Completed, vec![latte(2), scone(1)]),
            order(2, OrderStatus::Completed, vec![latte(1)]),
            order(3, OrderStatus::Placed, vec![scone(5)]),
        ];

        let summary = SalesSummary::from_orders(&orders, 5);
        assert_eq!(summary.completed_orders, 2);
        assert_eq!(summary.open_orders, 1);
        assert_eq!(summary.revenue, Decimal::new(1650, 2));
        assert_eq!(summary.average_ticket, Some(Decimal::new(825, 2)));
        assert_eq!(summary.top_items[0].menu_item_id, "latte");
        assert_eq!(summary.top_items[0].quantity, 3);
        assert_eq!(summary.top_items[1].quantity, 1);
    }

    #[test]
    fn test_summary_saturates_on_huge_counts() {
        let bulk = |qty| LineItem::new("bulk", "Bulk", qty, Decimal::ZERO);
        let orders = vec![
            order(1, OrderStatus::Completed, vec![bulk(u32::MAX)]),
            order(2, OrderStatus::Completed, vec![bulk(5)]),
            Order {
                total_amount: Some(Decimal::MAX),
                ..order(3, OrderStatus::Completed, vec![])
            },
            Order {
                total_amount: Some(Decimal::MAX),
                ..order(4, OrderStatus::Completed, vec![])
            },
        ];

        let summary = SalesSummary::from_orders(&orders, 1);
        assert_eq!(summary.top_items[0].quantity, u32::MAX);
        assert_eq!(summary.revenue, Decimal::MAX);
    }

    #[test]
    fn test_summary_without_sales() {
        let summary = SalesSummary::from_orders(&[], 3);
        assert_eq!(summary.revenue, Decimal::ZERO);
        assert_eq!(summary.average_ticket, None);
        assert!(summary.top_items.is_empty());
    }
}
