//! API handlers for the REST endpoints

pub mod equipment;
pub mod health;
pub mod movements;
pub mod openapi;
pub mod stats;
