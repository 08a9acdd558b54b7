//! # Storage Module
//!
//! Handles all data persistence for the barbershop log.
//!
//! The domain layer only sees the traits defined in [`traits`]; the concrete
//! backend (JSON documents on disk) can be swapped for a test double without
//! touching domain code.

pub mod json;
pub mod traits;

pub use json::{JsonConnection, PlanRepository, ServiceRepository};
pub use traits::{Connection, PlanStorage, ServiceStorage};
