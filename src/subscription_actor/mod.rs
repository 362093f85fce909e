//! Subscription rules: terms, pause/resume/cancel, and time-based expiry.

mod actions;
pub mod entity;

pub use actions::*;
pub use entity::SubscriptionCreate;
