//! Store change events.
//!
//! Every mutating store operation emits exactly one event to its registered
//! observers. The stores only describe *what changed*; how a change is shown
//! to the user (toast text, re-render) is decided by the observers, so the
//! persistence layer stays decoupled from presentation feedback.

use crate::domain::models::{ClientPlan, Service};
use std::sync::{Arc, Mutex};

/// A change that happened in one of the stores.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    ServiceAdded { service: Service },
    ServiceUpdated { service: Service },
    ServiceDeleted { id: String },
    ServicesImported { count: usize },
    TodayCleared { removed: usize },
    CatalogSaved { count: usize },
    PlanAdded { plan: ClientPlan },
    PlanUpdated { plan: ClientPlan },
    PlanDeleted { id: String },
    CreditConsumed { plan: ClientPlan },
    /// Consume was requested on a plan with no credits left. The plan state
    /// did not change.
    NoCreditsRemaining { plan_name: String },
    PlanRenewed { plan: ClientPlan },
    /// A mutation was applied in memory but the document write failed.
    SaveFailed { reason: String },
}

/// Receives store change events. Implementations must not mutate the store
/// from inside the callback.
pub trait StoreObserver: Send + Sync {
    fn notify(&self, event: &StoreEvent);
}

/// Shared observer list used by both stores.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Arc<Mutex<Vec<Arc<dyn StoreObserver>>>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: Arc<dyn StoreObserver>) {
        self.observers.lock().unwrap().push(observer);
    }

    pub fn emit(&self, event: StoreEvent) {
        let observers = self.observers.lock().unwrap();
        for observer in observers.iter() {
            observer.notify(&event);
        }
    }
}
