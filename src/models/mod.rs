//! Domain records and request DTOs for every stored collection.

pub mod category;
pub mod progress;
pub mod settings;
pub mod user;
pub mod video;
