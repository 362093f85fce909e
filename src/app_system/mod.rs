//! Service startup, wiring, and shutdown.
//!
//! - [`StationSystem`] starts one actor per table and hands out a [`Backend`]
//! - [`setup_tracing`] installs the log subscriber

pub mod station_system;
pub mod telemetry;

pub use station_system::*;
pub use telemetry::*;
