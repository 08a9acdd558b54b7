//! Domain models for the barbershop log.

pub mod plan;
pub mod service;

pub use plan::{validate_plan_input, ClientPlan, PlanValidationError};
pub use service::{
    default_catalog, validate_service_input, PaymentMethod, PredefinedService, Service,
    ServiceValidationError,
};
