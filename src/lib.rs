//! FlowBarber core: daily service log, revenue reporting and client plans
//! for a single-chair barbershop.
//!
//! The crate owns the data model, the two persistent stores and the
//! reporting functions; presentation (forms, charts, sheets) lives in the
//! embedding application. Data persists as whole JSON documents in a local
//! data directory, one document per collection, rewritten on every mutation.
//!
//! Typical wiring:
//!
//! ```no_run
//! use flowbarber::domain::{ObserverRegistry, PlanStore, ServiceStore, ToastCenter};
//! use flowbarber::storage::JsonConnection;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let connection = Arc::new(JsonConnection::new_default()?);
//! let observers = ObserverRegistry::new();
//! let toasts = ToastCenter::new();
//! observers.subscribe(toasts.clone());
//!
//! let services = ServiceStore::new(connection.clone(), observers.clone());
//! services.load();
//! let plans = PlanStore::new(connection, services.clone(), observers);
//! plans.load();
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod storage;

pub use domain::models::{ClientPlan, PaymentMethod, PredefinedService, Service};
pub use domain::{PlanStore, ServiceStore};
pub use storage::JsonConnection;
