//! How often each screen re-reads the collaborator.
//!
//! Every query a screen reads gets its own [`Poller`] task. Tasks never
//! coordinate and never touch the store: they only send [`Loaded`]
//! messages back to the [`crate::session::Session`] that mounted them.

use crate::app_system::Backend;
use crate::domain::Timestamp;
use crate::query::{fetch, Query, QueryData};
use crate::error::RemoteError;
use crate::views::{range_bounds, today_bounds};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, instrument, Instrument};

/// Number of best sellers shown on the analytics screen.
pub const TOP_SELLING_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshPolicy {
    /// The full order list (dashboard, order board).
    pub all_orders: Duration,
    /// Status-filtered order queries (kitchen).
    pub status_queries: Duration,
    /// Views that depend on subscription expiry.
    pub subscription_expiry: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            all_orders: Duration::from_secs(30),
            status_queries: Duration::from_secs(10),
            subscription_expiry: Duration::from_secs(60),
        }
    }
}

impl RefreshPolicy {
    /// `None` means the query is fetched once on mount and again only
    /// when a mutation invalidates it.
    pub fn period(&self, query: &Query) -> Option<Duration> {
        match query {
            Query::AllOrders => Some(self.all_orders),
            Query::ActiveOrders | Query::OrdersByStatus(_) => Some(self.status_queries),
            Query::ExpiringSubscriptions => Some(self.subscription_expiry),
            Query::AvailableMenu
            | Query::AllMenu
            | Query::LowStock
            | Query::Subscriptions
            | Query::ActiveSubscriptionCount
            | Query::Customers
            | Query::Plans
            | Query::PlanEnrollment
            | Query::RevenueRange(..)
            | Query::DailyBreakdown(..)
            | Query::TopSelling(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    CustomerOrder,
    Kitchen,
    Dashboard,
    OrderBoard,
    Menu,
    Inventory,
    Subscriptions,
    Customers,
    Plans,
    /// Revenue over the last `days` days.
    Analytics { days: i64 },
}

impl Screen {
    /// The reads this screen keeps current while mounted.
    pub fn queries(&self, now: Timestamp) -> Vec<Query> {
        match *self {
            Screen::CustomerOrder => vec![Query::AvailableMenu],
            Screen::Kitchen => vec![Query::ActiveOrders],
            Screen::Dashboard => {
                let (start, end) = today_bounds(now);
                vec![
                    Query::AllOrders,
                    Query::LowStock,
                    Query::ActiveSubscriptionCount,
                    Query::RevenueRange(start, end),
                ]
            }
            Screen::OrderBoard => vec![Query::AllOrders],
            Screen::Menu => vec![Query::AllMenu],
            Screen::Inventory => vec![Query::LowStock],
            Screen::Subscriptions => vec![Query::Subscriptions, Query::ExpiringSubscriptions],
            Screen::Customers => vec![Query::Customers],
            Screen::Plans => vec![Query::Plans, Query::PlanEnrollment],
            Screen::Analytics { days } => {
                let (start, end) = range_bounds(now, days);
                vec![
                    Query::RevenueRange(start, end),
                    Query::DailyBreakdown(start, end),
                    Query::TopSelling(TOP_SELLING_LIMIT),
                ]
            }
        }
    }
}

/// Orders fetch starts against invalidations. Shared by a session and
/// every task it spawns.
#[derive(Debug, Clone, Default)]
pub struct Sequence(Arc<AtomicU64>);

impl Sequence {
    /// Starts at 1, so 0 reads as "before anything happened".
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// A finished fetch, successful or not.
#[derive(Debug)]
pub struct Loaded {
    pub query: Query,
    pub result: Result<QueryData, RemoteError>,
    /// Sequence number taken just before the request was sent.
    pub started: u64,
}

/// The polling tasks of one mounted screen. Dropping it stops them;
/// a fetch already in flight is abandoned with its task.
pub struct Poller {
    tasks: Vec<JoinHandle<()>>,
}

impl Poller {
    pub fn start(
        backend: &Backend,
        policy: &RefreshPolicy,
        queries: &[Query],
        sender: &mpsc::Sender<Loaded>,
        sequence: &Sequence,
    ) -> Self {
        let tasks = queries
            .iter()
            .map(|query| {
                let span = tracing::debug_span!("poller", ?query);
                tokio::spawn(
                    poll(
                        backend.clone(),
                        *query,
                        policy.period(query),
                        sender.clone(),
                        sequence.clone(),
                    )
                    .instrument(span),
                )
            })
            .collect();
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Fetches once, then on every tick if the query has a period. A slow
/// fetch delays only this query's next tick.
async fn poll(
    backend: Backend,
    query: Query,
    period: Option<Duration>,
    sender: mpsc::Sender<Loaded>,
    sequence: Sequence,
) {
    let Some(period) = period else {
        let started = sequence.next();
        let result = fetch(&backend, &query).await;
        let _ = sender.send(Loaded { query, result, started }).await;
        return;
    };

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let started = sequence.next();
        let result = fetch(&backend, &query).await;
        if sender.send(Loaded { query, result, started }).await.is_err() {
            debug!("Session gone, stopping");
            break;
        }
    }
}

/// Fetches `query` once outside any poller, for refetches after a mutation.
#[instrument(skip(backend, sender, sequence))]
pub fn refetch(backend: &Backend, query: Query, sender: &mpsc::Sender<Loaded>, sequence: &Sequence) {
    tokio::spawn(poll(backend.clone(), query, None, sender.clone(), sequence.clone()));
}
