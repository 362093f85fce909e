//! Pure projections of store data into what each screen shows.
//!
//! Nothing here performs I/O or reads a clock; "now" is always passed in.

pub mod analytics;
pub mod board;
pub mod catalog;
pub mod dashboard;
pub mod kitchen;
pub mod subscriptions;

pub use analytics::*;
pub use board::*;
pub use catalog::*;
pub use dashboard::*;
pub use kitchen::*;
pub use subscriptions::*;
