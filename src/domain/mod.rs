//! # Domain Module
//!
//! Business logic for the barbershop log: the two persistent stores, the
//! revenue aggregation used by the analytics charts, and the report
//! import/export text handling.
//!
//! ## Module Organization
//!
//! - **service_store**: owner of the service collection and template catalog
//! - **plan_store**: owner of the client-plan collection
//! - **reporting**: pure summary and chart-bucketing functions
//! - **import_service**: best-effort parser for pasted report text
//! - **export_service**: summary and history report text generation
//! - **events / notifications**: store change events and the toast layer
//! - **commands**: the input structs the stores accept
//!
//! ## Core Concepts
//!
//! - **Service**: one billable, dated barbering action
//! - **ClientPlan**: a prepaid bundle of cuts for one client
//! - **Credit**: one unit of remaining entitlement within a plan
//!
//! The stores are storage-agnostic (they work against the traits in
//! [`crate::storage`]) and UI-agnostic (they emit change events; the toast
//! wording lives in [`notifications`]).

pub mod commands;
pub mod events;
pub mod export_service;
pub mod import_service;
pub mod models;
pub mod notifications;
pub mod plan_store;
pub mod reporting;
pub mod service_store;

pub use events::{ObserverRegistry, StoreEvent, StoreObserver};
pub use export_service::ExportService;
pub use notifications::{Toast, ToastCenter, ToastVariant};
pub use plan_store::PlanStore;
pub use service_store::ServiceStore;
