//! Business logic services.

pub mod admin_stats;
pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod join;
pub mod progress;
pub mod settings;
pub mod tracking;
