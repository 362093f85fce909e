//! The client event loop.
//!
//! A [`Session`] is driven from one task. It owns the [`Store`]; pollers
//! and refetches only ever talk to it through [`Loaded`] messages, which
//! the driver feeds back with [`Session::apply`].

use crate::app_system::Backend;
use crate::config::Config;
use crate::domain::{
    Clock, Customer, CustomerFields, CustomerId, InventoryItem, InventoryItemFields,
    InventoryItemId, MenuItem, MenuItemFields, MenuItemId, NewSubscription, Order, OrderId,
    OrderStatus, PlaceOrder, Plan, PlanFields, PlanId, Subscription, SubscriptionChanges,
    SubscriptionId, SubscriptionStatus, Timestamp,
};
use crate::error::{AppError, AppResult, RemoteError, ValidationError};
use crate::query::Query;
use crate::refresh::{refetch, Loaded, Poller, RefreshPolicy, Screen, Sequence};
use crate::store::Store;
use crate::views::{self, Board, Dashboard, KitchenFeed};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

const LOADED_BUFFER: usize = 64;

/// A successful write and the reads it makes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    PlaceOrder,
    OrderStatus,
    Menu,
    Inventory,
    Customer,
    Subscription,
    Plan,
}

impl Mutation {
    pub fn invalidates(self, query: &Query) -> bool {
        match self {
            Mutation::PlaceOrder | Mutation::OrderStatus => matches!(
                query,
                Query::AllOrders
                    | Query::ActiveOrders
                    | Query::OrdersByStatus(_)
                    | Query::RevenueRange(..)
                    | Query::DailyBreakdown(..)
                    | Query::TopSelling(_)
            ),
            Mutation::Menu => matches!(
                query,
                Query::AvailableMenu | Query::AllMenu | Query::TopSelling(_)
            ),
            Mutation::Inventory => matches!(query, Query::LowStock),
            Mutation::Customer => matches!(query, Query::Customers),
            Mutation::Subscription => matches!(
                query,
                Query::Subscriptions
                    | Query::ExpiringSubscriptions
                    | Query::ActiveSubscriptionCount
                    | Query::PlanEnrollment
            ),
            Mutation::Plan => matches!(query, Query::Plans),
        }
    }
}

/// What one [`Session::drain`] pass did with the queued results.
#[derive(Debug, Default)]
pub struct Drained {
    pub applied: usize,
    /// Background fetches that failed, for the caller to notify about.
    pub failed: Vec<AppError>,
}

pub struct Session {
    backend: Backend,
    policy: RefreshPolicy,
    clock: Clock,
    store: Store,
    screen: Option<Screen>,
    mounted: Vec<Query>,
    mounted_day: Option<Timestamp>,
    poller: Option<Poller>,
    sequence: Sequence,
    sender: mpsc::Sender<Loaded>,
    receiver: mpsc::Receiver<Loaded>,
}

impl Session {
    pub fn new(backend: Backend, config: &Config, clock: Clock) -> Self {
        let (sender, receiver) = mpsc::channel(LOADED_BUFFER);
        Self {
            backend,
            policy: config.refresh.clone(),
            clock,
            store: Store::new(),
            screen: None,
            mounted: Vec::new(),
            mounted_day: None,
            poller: None,
            sequence: Sequence::default(),
            sender,
            receiver,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn screen(&self) -> Option<Screen> {
        self.screen
    }

    pub fn mounted(&self) -> &[Query] {
        &self.mounted
    }

    fn now(&self) -> Timestamp {
        (self.clock)()
    }

    /// Switches to `screen`. The previous screen's polling stops here;
    /// its in-flight results are dropped when they arrive.
    #[instrument(skip(self))]
    pub async fn mount(&mut self, screen: Screen) {
        self.unmount();

        if screen == Screen::Subscriptions {
            match self.backend.subscriptions.check_and_expire_subscriptions().await {
                Ok(expired) => debug!(expired, "Expiry sweep done"),
                Err(e) => warn!(error = %e, "Expiry sweep failed"),
            }
        }

        let now = self.now();
        let queries = screen.queries(now);
        for query in &queries {
            self.store.invalidate(*query, self.sequence.next());
        }
        self.poller = Some(Poller::start(
            &self.backend,
            &self.policy,
            &queries,
            &self.sender,
            &self.sequence,
        ));
        self.mounted = queries;
        self.mounted_day = Some(now.start_of_day());
        self.screen = Some(screen);
        info!(queries = self.mounted.len(), "Screen mounted");
    }

    pub fn unmount(&mut self) {
        self.poller = None;
        self.mounted.clear();
        self.mounted_day = None;
        self.screen = None;
    }

    /// Remounts the current screen once the clock has crossed midnight, so
    /// day-bounded reads like the dashboard's revenue move to the new day.
    pub async fn roll_day(&mut self) -> bool {
        let (Some(screen), Some(day)) = (self.screen, self.mounted_day) else {
            return false;
        };
        if self.now().start_of_day() == day {
            return false;
        }
        info!(?screen, "Day changed, remounting");
        self.mount(screen).await;
        true
    }

    pub async fn next_loaded(&mut self) -> Option<Loaded> {
        self.receiver.recv().await
    }

    /// Folds a fetch result into the store. Results for queries that are no
    /// longer mounted, or that were superseded by an invalidation, are
    /// discarded (`Ok(false)`); a failed fetch leaves the last good data in
    /// place.
    pub fn apply(&mut self, loaded: Loaded) -> AppResult<bool> {
        if !self.mounted.contains(&loaded.query) {
            debug!(query = ?loaded.query, "Discarding result for unmounted query");
            return Ok(false);
        }
        match loaded.result {
            Ok(data) => {
                let now = self.now();
                Ok(self.store.load(loaded.query, data, now, loaded.started))
            }
            Err(e) => {
                warn!(query = ?loaded.query, error = %e, "Fetch failed, keeping last data");
                Err(e.into())
            }
        }
    }

    /// Applies every result already queued without waiting.
    pub fn drain(&mut self) -> Drained {
        let mut drained = Drained::default();
        while let Ok(loaded) = self.receiver.try_recv() {
            match self.apply(loaded) {
                Ok(true) => drained.applied += 1,
                Ok(false) => {}
                Err(e) => drained.failed.push(e),
            }
        }
        drained
    }

    /// Waits until every mounted query has fresh data. Stops at the first
    /// failed fetch.
    pub async fn settle(&mut self) -> AppResult<()> {
        while self.mounted.iter().any(|query| self.store.is_stale(query)) {
            match self.next_loaded().await {
                Some(loaded) => {
                    self.apply(loaded)?;
                }
                None => break,
            }
        }
        Ok(())
    }

    /// Marks `query` stale and fetches it again in the background.
    pub fn refresh(&mut self, query: Query) {
        self.store.invalidate(query, self.sequence.next());
        refetch(&self.backend, query, &self.sender, &self.sequence);
    }

    fn invalidate(&mut self, mutation: Mutation) {
        let stale = self
            .store
            .invalidate_matching(|query| mutation.invalidates(query), self.sequence.next());
        debug!(?mutation, invalidated = stale.len(), "Queries invalidated");
        for query in self.mounted.iter().filter(|query| mutation.invalidates(query)) {
            refetch(&self.backend, *query, &self.sender, &self.sequence);
        }
    }

    fn outcome<T>(&mut self, mutation: Mutation, result: Result<T, RemoteError>) -> AppResult<T> {
        match result {
            Ok(value) => {
                info!(?mutation, "Mutation applied");
                self.invalidate(mutation);
                Ok(value)
            }
            Err(e) => {
                warn!(?mutation, error = %e, "Mutation failed");
                Err(e.into())
            }
        }
    }

    // --- Views ---

    pub fn board(&self) -> Board {
        views::board(&self.store.orders_for(&Query::AllOrders))
    }

    pub fn kitchen_feed(&self, now: Timestamp) -> KitchenFeed {
        views::kitchen_feed(&self.store.orders_for(&Query::ActiveOrders), now)
    }

    pub fn dashboard(&self) -> Dashboard {
        let mut dashboard = views::dashboard(&self.store.orders_for(&Query::AllOrders));
        dashboard.low_stock_count = self.store.low_stock().len();
        dashboard.active_subscriptions = self.store.count(&Query::ActiveSubscriptionCount);
        dashboard.today = self
            .mounted
            .iter()
            .find(|query| matches!(query, Query::RevenueRange(..)))
            .and_then(|query| self.store.revenue(query));
        dashboard
    }

    // --- Orders ---

    #[instrument(skip(self, request), fields(customer = %request.customer_name))]
    pub async fn place_order(&mut self, request: PlaceOrder) -> AppResult<Order> {
        if request.items.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }
        let result = self.backend.orders.place_order(request).await;
        let order = self.outcome(Mutation::PlaceOrder, result)?;
        self.store.orders.upsert(order.clone());
        Ok(order)
    }

    /// Sends `status` as the order's target. No local legality check: an
    /// illegal request comes back rejected and the store is left as it was.
    #[instrument(skip(self))]
    pub async fn set_order_status(&mut self, id: OrderId, status: OrderStatus) -> AppResult<Order> {
        let result = self.backend.orders.update_order_status(id, status).await;
        let order = self.outcome(Mutation::OrderStatus, result)?;
        self.store.orders.upsert(order.clone());
        Ok(order)
    }

    /// Takes the forward step offered on the order's card.
    pub async fn advance_order(&mut self, id: OrderId) -> AppResult<Order> {
        let status = self
            .store
            .orders
            .get(&id)
            .map(|order| order.status)
            .ok_or(ValidationError::UnknownOrder(id))?;
        let next = status.next().ok_or(ValidationError::NoForwardStep(status))?;
        self.set_order_status(id, next).await
    }

    pub async fn cancel_order(&mut self, id: OrderId) -> AppResult<Order> {
        self.set_order_status(id, OrderStatus::Cancelled).await
    }

    // --- Menu ---

    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn create_menu_item(&mut self, item: MenuItemFields) -> AppResult<MenuItem> {
        let result = self.backend.menu.create_menu_item(item).await;
        let item = self.outcome(Mutation::Menu, result)?;
        self.store.menu.upsert(item.clone());
        Ok(item)
    }

    #[instrument(skip(self, item))]
    pub async fn update_menu_item(&mut self, id: MenuItemId, item: MenuItemFields) -> AppResult<MenuItem> {
        let result = self.backend.menu.update_menu_item(id, item).await;
        let item = self.outcome(Mutation::Menu, result)?;
        self.store.menu.upsert(item.clone());
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn delete_menu_item(&mut self, id: MenuItemId) -> AppResult<()> {
        let result = self.backend.menu.delete_menu_item(id).await;
        self.outcome(Mutation::Menu, result)?;
        self.store.forget_menu_item(id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn toggle_menu_item_availability(&mut self, id: MenuItemId) -> AppResult<MenuItem> {
        let result = self.backend.menu.toggle_menu_item_availability(id).await;
        let item = self.outcome(Mutation::Menu, result)?;
        self.store.menu.upsert(item.clone());
        Ok(item)
    }

    // --- Inventory ---

    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn create_inventory_item(&mut self, item: InventoryItemFields) -> AppResult<InventoryItem> {
        let result = self.backend.inventory.create_inventory_item(item).await;
        let item = self.outcome(Mutation::Inventory, result)?;
        self.store.inventory.upsert(item.clone());
        Ok(item)
    }

    #[instrument(skip(self, item))]
    pub async fn update_inventory_item(
        &mut self,
        id: InventoryItemId,
        item: InventoryItemFields,
    ) -> AppResult<InventoryItem> {
        let result = self.backend.inventory.update_inventory_item(id, item).await;
        let item = self.outcome(Mutation::Inventory, result)?;
        self.store.inventory.upsert(item.clone());
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn update_stock_level(&mut self, id: InventoryItemId, quantity: f64) -> AppResult<InventoryItem> {
        if quantity.is_nan() || quantity < 0.0 {
            return Err(ValidationError::Negative { field: "quantity" }.into());
        }
        let result = self.backend.inventory.update_stock_level(id, quantity).await;
        let item = self.outcome(Mutation::Inventory, result)?;
        self.store.inventory.upsert(item.clone());
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn delete_inventory_item(&mut self, id: InventoryItemId) -> AppResult<()> {
        let result = self.backend.inventory.delete_inventory_item(id).await;
        self.outcome(Mutation::Inventory, result)?;
        self.store.forget_inventory(id);
        Ok(())
    }

    /// Every inventory item this session has created, updated, or seen in
    /// a low-stock result.
    pub fn inventory(&self) -> Vec<InventoryItem> {
        self.store.inventory.rows().cloned().collect()
    }

    // --- Customers ---

    #[instrument(skip(self, customer), fields(name = %customer.name))]
    pub async fn create_customer(&mut self, customer: CustomerFields) -> AppResult<Customer> {
        let result = self.backend.customers.create_customer(customer).await;
        let customer = self.outcome(Mutation::Customer, result)?;
        self.store.customers.upsert(customer.clone());
        Ok(customer)
    }

    #[instrument(skip(self, customer))]
    pub async fn update_customer(&mut self, id: CustomerId, customer: CustomerFields) -> AppResult<Customer> {
        let result = self.backend.customers.update_customer(id, customer).await;
        let customer = self.outcome(Mutation::Customer, result)?;
        self.store.customers.upsert(customer.clone());
        Ok(customer)
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&mut self, id: CustomerId) -> AppResult<()> {
        let result = self.backend.customers.delete_customer(id).await;
        self.outcome(Mutation::Customer, result)?;
        self.store.forget_customer(id);
        Ok(())
    }

    // --- Subscriptions ---

    #[instrument(skip(self, subscription), fields(customer = %subscription.customer_name))]
    pub async fn create_subscription(&mut self, subscription: NewSubscription) -> AppResult<Subscription> {
        let result = self.backend.subscriptions.create_subscription(subscription).await;
        let sub = self.outcome(Mutation::Subscription, result)?;
        self.store.subscriptions.upsert(sub.clone());
        Ok(sub)
    }

    #[instrument(skip(self, changes))]
    pub async fn update_subscription(
        &mut self,
        id: SubscriptionId,
        changes: SubscriptionChanges,
    ) -> AppResult<Subscription> {
        let result = self.backend.subscriptions.update_subscription(id, changes).await;
        let sub = self.outcome(Mutation::Subscription, result)?;
        self.store.subscriptions.upsert(sub.clone());
        Ok(sub)
    }

    #[instrument(skip(self))]
    pub async fn update_subscription_status(
        &mut self,
        id: SubscriptionId,
        status: SubscriptionStatus,
    ) -> AppResult<Subscription> {
        let result = self.backend.subscriptions.update_subscription_status(id, status).await;
        let sub = self.outcome(Mutation::Subscription, result)?;
        self.store.subscriptions.upsert(sub.clone());
        Ok(sub)
    }

    // --- Plans ---

    #[instrument(skip(self, plan), fields(name = %plan.name))]
    pub async fn create_plan(&mut self, plan: PlanFields) -> AppResult<Plan> {
        let result = self.backend.plans.create_plan(plan).await;
        let plan = self.outcome(Mutation::Plan, result)?;
        self.store.plans.upsert(plan.clone());
        Ok(plan)
    }

    #[instrument(skip(self, plan))]
    pub async fn update_plan(&mut self, id: PlanId, plan: PlanFields) -> AppResult<Plan> {
        let result = self.backend.plans.update_plan(id, plan).await;
        let plan = self.outcome(Mutation::Plan, result)?;
        self.store.plans.upsert(plan.clone());
        Ok(plan)
    }

    #[instrument(skip(self))]
    pub async fn delete_plan(&mut self, id: PlanId) -> AppResult<()> {
        let result = self.backend.plans.delete_plan(id).await;
        self.outcome(Mutation::Plan, result)?;
        self.store.forget_plan(id);
        Ok(())
    }
}
