use crate::refresh::RefreshPolicy;
use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::{info, warn};

const DEFAULT_ACTOR_BUFFER: usize = 100;
const DEFAULT_ALL_ORDERS_POLL_SECS: u64 = 30;
const DEFAULT_STATUS_POLL_SECS: u64 = 10;
const DEFAULT_SUBSCRIPTION_POLL_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Mailbox size of every collaborator actor.
    pub actor_buffer: usize,
    pub refresh: RefreshPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            actor_buffer: DEFAULT_ACTOR_BUFFER,
            refresh: RefreshPolicy::default(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(|key| env::var(key).ok())
    }

    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let actor_buffer = try_load(&lookup, "STATION_ACTOR_BUFFER", DEFAULT_ACTOR_BUFFER);
        let all_orders =
            try_load(&lookup, "STATION_ALL_ORDERS_POLL_SECS", DEFAULT_ALL_ORDERS_POLL_SECS);
        let status_queries =
            try_load(&lookup, "STATION_STATUS_POLL_SECS", DEFAULT_STATUS_POLL_SECS);
        let subscription_expiry = try_load(
            &lookup,
            "STATION_SUBSCRIPTION_POLL_SECS",
            DEFAULT_SUBSCRIPTION_POLL_SECS,
        );

        Self {
            // A zero-capacity mpsc channel panics.
            actor_buffer: actor_buffer.max(1),
            refresh: RefreshPolicy {
                all_orders: Duration::from_secs(all_orders.max(1)),
                status_queries: Duration::from_secs(status_queries.max(1)),
                subscription_expiry: Duration::from_secs(subscription_expiry.max(1)),
            },
        }
    }
}

fn try_load<T: FromStr + Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T
where
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Config::load_from(lookup(&[])), Config::default());
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = Config::load_from(lookup(&[
            ("STATION_ACTOR_BUFFER", "8"),
            ("STATION_STATUS_POLL_SECS", " 5 "),
            ("STATION_ALL_ORDERS_POLL_SECS", "soon"),
        ]));
        assert_eq!(config.actor_buffer, 8);
        assert_eq!(config.refresh.status_queries, Duration::from_secs(5));
        assert_eq!(config.refresh.all_orders, Duration::from_secs(30));
        assert_eq!(config.refresh.subscription_expiry, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_values_are_raised() {
        let config = Config::load_from(lookup(&[
            ("STATION_ACTOR_BUFFER", "0"),
            ("STATION_STATUS_POLL_SECS", "0"),
        ]));
        assert_eq!(config.actor_buffer, 1);
        assert_eq!(config.refresh.status_queries, Duration::from_secs(1));
    }
}
