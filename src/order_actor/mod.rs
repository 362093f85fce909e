//! Order rules enforced by the collaborator: creation and the status lifecycle.

mod actions;
pub mod entity;

pub use actions::*;
pub use entity::*;
