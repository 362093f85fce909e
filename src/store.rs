//! Client-side repository.
//!
//! One [`Table`] per record type, keyed by id, plus a [`QueryState`] per
//! [`Query`] remembering which rows (or which aggregate) that query last
//! returned and whether it is stale. Screens read through query state, so
//! a row left behind in a table never leaks into a view.

use crate::actor_framework::Entity;
use crate::domain::{
    Customer, DailyStats, InventoryItem, MenuItem, Order, Plan, PlanEnrollment, RevenueSummary,
    Subscription, Timestamp, TopSellingItem,
};
use crate::query::{Query, QueryData};
use std::collections::HashMap;
use tracing::debug;

/// Rows keyed by id, iterated in the order they were first seen.
#[derive(Debug, Clone)]
pub struct Table<T: Entity> {
    rows: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: Entity> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Entity> Table<T> {
    pub fn replace_all(&mut self, rows: Vec<T>) {
        self.rows.clear();
        self.order.clear();
        self.merge(rows);
    }

    pub fn merge(&mut self, rows: Vec<T>) {
        for row in rows {
            self.upsert(row);
        }
    }

    pub fn upsert(&mut self, row: T) {
        let id = row.id().clone();
        if self.rows.insert(id.clone(), row).is_none() {
            self.order.push(id);
        }
    }

    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let removed = self.rows.remove(id)?;
        self.order.retain(|known| known != id);
        Some(removed)
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.rows.get(id)
    }

    pub fn rows(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }

    /// The given ids that are still present, in the given order.
    pub fn select<'a>(&'a self, ids: &'a [T::Id]) -> impl Iterator<Item = &'a T> {
        ids.iter().filter_map(|id| self.rows.get(id))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What a query last produced, by reference into the tables where possible.
#[derive(Debug, Clone, PartialEq)]
pub enum Cached {
    Ids(Vec<u64>),
    Count(u64),
    Revenue(RevenueSummary),
    Daily(Vec<DailyStats>),
    TopSelling(Vec<TopSellingItem>),
    Enrollment(Vec<PlanEnrollment>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub cached: Option<Cached>,
    pub stale: bool,
    pub loaded_at: Option<Timestamp>,
    /// Sequence number of the latest invalidation. Fetches that started
    /// before it are superseded.
    pub invalidated: u64,
}

impl QueryState {
    fn pending(invalidated: u64) -> Self {
        Self {
            cached: None,
            stale: true,
            loaded_at: None,
            invalidated,
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    pub orders: Table<Order>,
    pub menu: Table<MenuItem>,
    /// Every inventory item this session has seen. The collaborator cannot
    /// enumerate inventory, so this starts empty on every run.
    pub inventory: Table<InventoryItem>,
    pub subscriptions: Table<Subscription>,
    pub customers: Table<Customer>,
    pub plans: Table<Plan>,
    queries: HashMap<Query, QueryState>,
}

fn ids_of<T: Entity<Id = u64>>(rows: &[T]) -> Vec<u64> {
    rows.iter().map(|row| *row.id()).collect()
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful fetch and marks the query fresh. A fetch that
    /// started before the query's latest invalidation is dropped and
    /// `false` returned.
    pub fn load(&mut self, query: Query, data: QueryData, at: Timestamp, started: u64) -> bool {
        let invalidated = self.queries.get(&query).map_or(0, |state| state.invalidated);
        if started < invalidated {
            debug!(?query, started, invalidated, "Dropping superseded result");
            return false;
        }
        let cached = match data {
            QueryData::Orders(rows) => {
                let ids = ids_of(&rows);
                self.orders.merge(rows);
                Cached::Ids(ids)
            }
            QueryData::Menu(rows) => {
                let ids = ids_of(&rows);
                self.menu.merge(rows);
                Cached::Ids(ids)
            }
            QueryData::Inventory(rows) => {
                let ids = ids_of(&rows);
                self.inventory.merge(rows);
                Cached::Ids(ids)
            }
            QueryData::Subscriptions(rows) => {
                let ids = ids_of(&rows);
                self.subscriptions.merge(rows);
                Cached::Ids(ids)
            }
            QueryData::Customers(rows) => {
                let ids = ids_of(&rows);
                self.customers.replace_all(rows);
                Cached::Ids(ids)
            }
            QueryData::Plans(rows) => {
                let ids = ids_of(&rows);
                self.plans.replace_all(rows);
                Cached::Ids(ids)
            }
            QueryData::Enrollment(rows) => Cached::Enrollment(rows),
            QueryData::Count(n) => Cached::Count(n),
            QueryData::Revenue(summary) => Cached::Revenue(summary),
            QueryData::Daily(days) => Cached::Daily(days),
            QueryData::TopSelling(items) => Cached::TopSelling(items),
        };
        debug!(?query, "Query loaded");
        self.queries.insert(
            query,
            QueryState {
                cached: Some(cached),
                stale: false,
                loaded_at: Some(at),
                invalidated,
            },
        );
        true
    }

    /// Marks the query stale as of sequence number `at`. Its last result
    /// stays visible until a fetch started after `at` lands.
    pub fn invalidate(&mut self, query: Query, at: u64) {
        let state = self
            .queries
            .entry(query)
            .or_insert_with(|| QueryState::pending(at));
        state.stale = true;
        state.invalidated = state.invalidated.max(at);
    }

    /// Invalidates every known query `affected` selects and returns them.
    pub fn invalidate_matching(&mut self, affected: impl Fn(&Query) -> bool, at: u64) -> Vec<Query> {
        self.queries
            .iter_mut()
            .filter(|(query, _)| affected(query))
            .map(|(query, state)| {
                state.stale = true;
                state.invalidated = state.invalidated.max(at);
                *query
            })
            .collect()
    }

    /// Never loaded, or invalidated since.
    pub fn is_stale(&self, query: &Query) -> bool {
        self.queries.get(query).map_or(true, |state| state.stale)
    }

    pub fn state(&self, query: &Query) -> Option<&QueryState> {
        self.queries.get(query)
    }

    fn cached(&self, query: &Query) -> Option<&Cached> {
        self.queries.get(query)?.cached.as_ref()
    }

    fn ids(&self, query: &Query) -> &[u64] {
        match self.cached(query) {
            Some(Cached::Ids(ids)) => ids,
            _ => &[],
        }
    }

    /// Current rows of an order query, in the order it returned them.
    pub fn orders_for(&self, query: &Query) -> Vec<Order> {
        self.orders.select(self.ids(query)).cloned().collect()
    }

    pub fn menu_for(&self, query: &Query) -> Vec<MenuItem> {
        self.menu.select(self.ids(query)).cloned().collect()
    }

    pub fn subscriptions_for(&self, query: &Query) -> Vec<Subscription> {
        self.subscriptions.select(self.ids(query)).cloned().collect()
    }

    pub fn low_stock(&self) -> Vec<InventoryItem> {
        self.inventory
            .select(self.ids(&Query::LowStock))
            .cloned()
            .collect()
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.customers.select(self.ids(&Query::Customers)).cloned().collect()
    }

    pub fn plans(&self) -> Vec<Plan> {
        self.plans.select(self.ids(&Query::Plans)).cloned().collect()
    }

    pub fn count(&self, query: &Query) -> Option<u64> {
        match self.cached(query)? {
            Cached::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn revenue(&self, query: &Query) -> Option<RevenueSummary> {
        match self.cached(query)? {
            Cached::Revenue(summary) => Some(*summary),
            _ => None,
        }
    }

    pub fn daily(&self, query: &Query) -> Option<&[DailyStats]> {
        match self.cached(query)? {
            Cached::Daily(days) => Some(days),
            _ => None,
        }
    }

    pub fn top_selling(&self, query: &Query) -> Option<&[TopSellingItem]> {
        match self.cached(query)? {
            Cached::TopSelling(items) => Some(items),
            _ => None,
        }
    }

    pub fn enrollment(&self) -> Option<&[PlanEnrollment]> {
        match self.cached(&Query::PlanEnrollment)? {
            Cached::Enrollment(rows) => Some(rows),
            _ => None,
        }
    }

    /// Drops a deleted row from its table and from every query that listed it.
    pub fn forget_inventory(&mut self, id: u64) {
        self.inventory.remove(&id);
        self.drop_id(id, |query| matches!(query, Query::LowStock));
    }

    pub fn forget_menu_item(&mut self, id: u64) {
        self.menu.remove(&id);
        self.drop_id(id, |query| matches!(query, Query::AllMenu | Query::AvailableMenu));
    }

    pub fn forget_customer(&mut self, id: u64) {
        self.customers.remove(&id);
        self.drop_id(id, |query| matches!(query, Query::Customers));
    }

    pub fn forget_plan(&mut self, id: u64) {
        self.plans.remove(&id);
        self.drop_id(id, |query| matches!(query, Query::Plans));
    }

    fn drop_id(&mut self, id: u64, applies: impl Fn(&Query) -> bool) {
        for (query, state) in self.queries.iter_mut() {
            if let (true, Some(Cached::Ids(ids))) = (applies(query), &mut state.cached) {
                ids.retain(|known| *known != id);
            }
        }
    }
}
