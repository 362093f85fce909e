use crate::actor_framework::{sequential_ids, Entity, ResourceActor, ResourceClient};
use crate::clients::{
    AnalyticsClient, CustomerClient, InventoryClient, MenuClient, OrderClient, PlanClient,
    SubscriptionClient,
};
use crate::config::Config;
use crate::domain::{system_clock, Clock, Customer, InventoryItem, MenuItem, Order, Plan, Subscription};
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// How long shutdown waits for an actor whose clients are still held elsewhere.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Every remote procedure the screens call, bundled for cheap cloning.
#[derive(Clone)]
pub struct Backend {
    pub orders: OrderClient,
    pub menu: MenuClient,
    pub inventory: InventoryClient,
    pub customers: CustomerClient,
    pub subscriptions: SubscriptionClient,
    pub plans: PlanClient,
    pub analytics: AnalyticsClient,
}

/// The in-process service: one actor per table, wired together and
/// handed out as a [`Backend`].
pub struct StationSystem {
    pub backend: Backend,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

fn spawn_actor<T: Entity<Id = u64>>(
    buffer: usize,
    handles: &mut Vec<tokio::task::JoinHandle<()>>,
) -> ResourceClient<T> {
    let (actor, client) = ResourceActor::<T>::new(buffer, sequential_ids());
    handles.push(tokio::spawn(actor.run()));
    client
}

impl StationSystem {
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, system_clock())
    }

    /// Startup order: leaf tables first, then the clients that orchestrate
    /// across them.
    #[instrument(name = "station_system", skip(config, clock))]
    pub fn with_clock(config: &Config, clock: Clock) -> Self {
        let buffer = config.actor_buffer;
        let mut handles = Vec::new();

        info!("Starting station system");

        let menu = MenuClient::new(spawn_actor::<MenuItem>(buffer, &mut handles));
        let inventory = InventoryClient::new(spawn_actor::<InventoryItem>(buffer, &mut handles));
        let customers = CustomerClient::new(spawn_actor::<Customer>(buffer, &mut handles));
        let subscriptions =
            SubscriptionClient::new(spawn_actor::<Subscription>(buffer, &mut handles), clock.clone());

        let orders = OrderClient::new(
            spawn_actor::<Order>(buffer, &mut handles),
            menu.clone(),
            clock,
        );
        let plans = PlanClient::new(spawn_actor::<Plan>(buffer, &mut handles), subscriptions.clone());
        let analytics = AnalyticsClient::new(orders.clone(), menu.clone());

        info!(actors = handles.len(), "Station system started");

        Self {
            backend: Backend {
                orders,
                menu,
                inventory,
                customers,
                subscriptions,
                plans,
                analytics,
            },
            handles,
        }
    }

    /// Drops this system's clients and waits for the actors to drain.
    /// Actors stay up while any other [`Backend`] clone is alive; those are
    /// aborted after a grace period.
    #[instrument(skip(self))]
    pub async fn shutdown(self) {
        info!("Shutting down station system");
        drop(self.backend);

        for mut handle in self.handles {
            match tokio::time::timeout(SHUTDOWN_GRACE, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(error = ?e, "Actor task failed"),
                Err(_) => {
                    warn!("Actor still has live clients, aborting");
                    handle.abort();
                }
            }
        }

        info!("Station system shutdown complete");
    }
}
