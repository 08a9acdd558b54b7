//! # JSON Storage Module
//!
//! File-based storage implementation keeping each collection in one JSON
//! document, rewritten wholesale on every mutation. This mirrors the
//! browser-local-storage layout the data originally lived in, so documents
//! written there deserialize here unchanged.

pub mod connection;
pub mod plan_repository;
pub mod service_repository;

pub use connection::JsonConnection;
pub use plan_repository::PlanRepository;
pub use service_repository::ServiceRepository;

use crate::storage::traits::Connection;

impl Connection for JsonConnection {
    type ServiceRepository = ServiceRepository;
    type PlanRepository = PlanRepository;

    fn create_service_repository(&self) -> Self::ServiceRepository {
        ServiceRepository::new(self.clone())
    }

    fn create_plan_repository(&self) -> Self::PlanRepository {
        PlanRepository::new(self.clone())
    }
}
