//! Menu item rules: field validation and the availability toggle.

mod actions;
pub mod entity;

pub use actions::*;
