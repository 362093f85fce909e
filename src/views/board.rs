use crate::domain::{Order, OrderStatus};
use serde::Serialize;

/// What an order card offers the operator. Illegal transitions are simply
/// not offered; the collaborator still has the final say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardActions {
    pub next: Option<(OrderStatus, &'static str)>,
    pub can_cancel: bool,
}

impl CardActions {
    pub fn for_status(status: OrderStatus) -> Self {
        Self {
            next: status.next().zip(status.action_label()),
            can_cancel: status.can_cancel(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardCard {
    pub order: Order,
    pub actions: CardActions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardColumn {
    pub status: OrderStatus,
    pub title: &'static str,
    pub cards: Vec<BoardCard>,
}

impl BoardColumn {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn order_ids(&self) -> Vec<u64> {
        self.cards.iter().map(|card| card.order.id).collect()
    }
}

/// Every order in exactly one of five columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub columns: Vec<BoardColumn>,
}

impl Board {
    pub fn column(&self, status: OrderStatus) -> &BoardColumn {
        // One column per status, in `OrderStatus::ALL` order.
        &self.columns[status as usize]
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|column| column.cards.len()).sum()
    }
}

/// Oldest first within each column; equal timestamps keep input order.
pub fn board(orders: &[Order]) -> Board {
    let columns = OrderStatus::ALL
        .into_iter()
        .map(|status| {
            let mut members: Vec<&Order> =
                orders.iter().filter(|order| order.status == status).collect();
            members.sort_by_key(|order| order.created_at);
            BoardColumn {
                status,
                title: status.label(),
                cards: members
                    .into_iter()
                    .map(|order| BoardCard {
                        order: order.clone(),
                        actions: CardActions::for_status(status),
                    })
                    .collect(),
            }
        })
        .collect();
    Board { columns }
}
