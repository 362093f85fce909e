//! Records exchanged with the collaborator. Plain data, no actor concerns.

pub mod analytics;
pub mod customer;
pub mod inventory;
pub mod menu;
pub mod order;
pub mod plan;
pub mod subscription;
pub mod time;

pub use analytics::*;
pub use customer::*;
pub use inventory::*;
pub use menu::*;
pub use order::*;
pub use plan::*;
pub use subscription::*;
pub use time::*;
