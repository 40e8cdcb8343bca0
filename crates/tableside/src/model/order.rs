//! A customer order placed at a table.
//!
//! # Document
//! Implements [`Document`](doc_framework::Document) in
//! [`order_actor::entity`](crate::order_actor::entity). Orders are never
//! deleted; they only move through [`OrderStatus`].
use crate::model::TenantId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// The table an order was placed from (the label encoded in its QR code).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableRef(pub String);

impl TableRef {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Preparation pipeline status.
///
/// ```text
/// Placed -> In Progress -> Ready -> Served
///    \          \            \        \
///     +----------+------------+--------+--> Completed   (bill settlement)
/// Placed / In Progress --> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Placed,
    #[serde(rename = "In Progress")]
    InProgress,
    Ready,
    Served,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Statuses whose orders still belong to an unpaid table bill.
    pub const OPEN: [OrderStatus; 4] = [
        OrderStatus::Placed,
        OrderStatus::InProgress,
        OrderStatus::Ready,
        OrderStatus::Served,
    ];

    /// The single status a staff member may advance to, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            OrderStatus::Placed => Some(OrderStatus::InProgress),
            OrderStatus::InProgress => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served | OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_open(self) -> bool {
        Self::OPEN.contains(&self)
    }

    pub fn can_cancel(self) -> bool {
        matches!(self, OrderStatus::Placed | OrderStatus::InProgress)
    }

    /// Position in the pipeline. A write may never lower it.
    pub(crate) fn stage(self) -> u8 {
        match self {
            OrderStatus::Placed => 0,
            OrderStatus::InProgress => 1,
            OrderStatus::Ready => 2,
            OrderStatus::Served => 3,
            OrderStatus::Completed => 4,
            OrderStatus::Cancelled => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "Placed",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Ready => "Ready",
            OrderStatus::Served => "Served",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One menu item on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Chosen options, e.g. `"milk" -> "oat"`.
    #[serde(default)]
    pub customizations: BTreeMap<String, String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl LineItem {
    pub fn new(menu_item_id: impl Into<String>, name: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            name: name.into(),
            quantity,
            unit_price,
            customizations: BTreeMap::new(),
            note: None,
        }
    }

    pub fn with_customization(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.customizations.insert(name.into(), value.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// `None` when the product does not fit in a `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub tenant_id: TenantId,
    pub table: TableRef,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Absent when the stored document has no usable number.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_amount: Option<Decimal>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total used by every aggregate: a missing amount counts as zero.
    pub fn total_or_zero(&self) -> Decimal {
        self.total_amount.unwrap_or(Decimal::ZERO)
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// Payload for placing a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub tenant_id: TenantId,
    pub table: TableRef,
    pub items: Vec<LineItem>,
}

/// Accepts numbers (or numeric strings); anything else becomes `None`.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(Decimal),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Amount>::deserialize(deserializer)? {
        Some(Amount::Number(value)) => Some(value),
        Some(Amount::Other(_)) | None => None,
    })
}
