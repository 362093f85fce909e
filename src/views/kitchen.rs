use crate::domain::{Order, OrderId, OrderStatus, Timestamp};
use serde::Serialize;
use std::fmt;

const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_SECOND: i64 = 1_000;

pub const WARNING_MINUTES: i64 = 10;
pub const CRITICAL_MINUTES: i64 = 15;

/// Time since an order was placed, as shown on its ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Elapsed {
    pub minutes: i64,
    pub seconds: i64,
}

impl Elapsed {
    /// Both instants are reduced to milliseconds first. A creation time in
    /// the future (clock skew) reads as `0:00`.
    pub fn between(created_at: Timestamp, now: Timestamp) -> Self {
        let millis = (now.as_millis() - created_at.as_millis()).max(0);
        Self {
            minutes: millis / MILLIS_PER_MINUTE,
            seconds: (millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND,
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

/// Styling band of a ticket. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Warning,
    Critical,
}

impl Urgency {
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes >= CRITICAL_MINUTES {
            Urgency::Critical
        } else if minutes >= WARNING_MINUTES {
            Urgency::Warning
        } else {
            Urgency::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketLine {
    pub quantity: u64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    pub order_id: OrderId,
    pub number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub lines: Vec<TicketLine>,
    pub notes: Option<String>,
    pub total_amount: f64,
    pub clock: String,
    pub elapsed: Elapsed,
    pub urgency: Urgency,
}

impl Ticket {
    fn new(order: &Order, now: Timestamp) -> Self {
        let mut ticket = Self {
            order_id: order.id,
            number: order.ticket_number(),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            status: order.status,
            created_at: order.created_at,
            lines: order
                .items
                .iter()
                .map(|line| TicketLine {
                    quantity: line.quantity,
                    label: format!("Item #{}", line.menu_item_id),
                })
                .collect(),
            notes: Some(order.notes.clone()).filter(|notes| !notes.trim().is_empty()),
            total_amount: order.total_amount,
            clock: String::new(),
            elapsed: Elapsed { minutes: 0, seconds: 0 },
            urgency: Urgency::Normal,
        };
        ticket.retick(now);
        ticket
    }

    pub fn retick(&mut self, now: Timestamp) {
        self.elapsed = Elapsed::between(self.created_at, now);
        self.clock = self.elapsed.to_string();
        self.urgency = Urgency::from_minutes(self.elapsed.minutes);
    }
}

/// In-progress orders split into the two kitchen columns, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KitchenFeed {
    pub new_orders: Vec<Ticket>,
    pub preparing: Vec<Ticket>,
}

impl KitchenFeed {
    /// Advances every ticket clock to `now` without touching order data.
    pub fn retick(&mut self, now: Timestamp) {
        self.new_orders
            .iter_mut()
            .chain(self.preparing.iter_mut())
            .for_each(|ticket| ticket.retick(now));
    }

    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.new_orders.iter().chain(self.preparing.iter())
    }

    pub fn len(&self) -> usize {
        self.new_orders.len() + self.preparing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn kitchen_feed(orders: &[Order], now: Timestamp) -> KitchenFeed {
    let mut active: Vec<&Order> = orders.iter().filter(|order| order.status.is_active()).collect();
    active.sort_by_key(|order| order.created_at);

    let (new_orders, preparing): (Vec<&Order>, Vec<&Order>) =
        active.into_iter().partition(|order| order.status == OrderStatus::New);

    KitchenFeed {
        new_orders: new_orders.into_iter().map(|order| Ticket::new(order, now)).collect(),
        preparing: preparing.into_iter().map(|order| Ticket::new(order, now)).collect(),
    }
}
