//! Salad bar station: an actor-backed order service and the client-side
//! session that drives its screens.

pub mod actor_framework;
pub mod app_system;
pub mod cart;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod query;
pub mod refresh;
pub mod session;
pub mod store;
pub mod validation;
pub mod views;

pub mod customer_actor;
pub mod inventory_actor;
pub mod menu_actor;
pub mod order_actor;
pub mod plan_actor;
pub mod subscription_actor;

#[cfg(test)]
mod mock_framework;
