//! # Storage Traits
//!
//! Storage abstraction traits that let the stores work against different
//! backends (JSON documents on disk, in-memory doubles in tests) without
//! modification.
//!
//! Each collection is persisted as one whole document, rewritten on every
//! mutation. `load_*` returns `Ok(None)` when the document has never been
//! written (first run); malformed content is an error the caller turns into
//! its documented fallback.

use crate::domain::models::{ClientPlan, PredefinedService, Service};
use anyhow::Result;

/// Interface for the service collection and the predefined-service catalog.
pub trait ServiceStorage: Send + Sync {
    /// Read the full service collection.
    fn load_services(&self) -> Result<Option<Vec<Service>>>;

    /// Replace the persisted service collection.
    fn save_services(&self, services: &[Service]) -> Result<()>;

    /// Read the predefined-service catalog.
    fn load_catalog(&self) -> Result<Option<Vec<PredefinedService>>>;

    /// Replace the persisted catalog.
    fn save_catalog(&self, catalog: &[PredefinedService]) -> Result<()>;
}

/// Interface for the client-plan collection.
pub trait PlanStorage: Send + Sync {
    /// Read the full plan collection.
    fn load_plans(&self) -> Result<Option<Vec<ClientPlan>>>;

    /// Replace the persisted plan collection.
    fn save_plans(&self, plans: &[ClientPlan]) -> Result<()>;
}

/// Factory trait abstracting the concrete connection type.
///
/// The stores are generic over this, so a test double or an alternative
/// document backend can be injected without touching domain code.
pub trait Connection: Send + Sync + Clone {
    type ServiceRepository: ServiceStorage + Clone;
    type PlanRepository: PlanStorage + Clone;

    fn create_service_repository(&self) -> Self::ServiceRepository;
    fn create_plan_repository(&self) -> Self::PlanRepository;
}
