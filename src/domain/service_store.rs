//! Services store: the single owner of the service collection and the
//! predefined-service catalog.
//!
//! Every mutation updates the in-memory list, rewrites the persisted
//! document synchronously, and emits one change event. A failed write keeps
//! the in-memory state (the user does not lose what is on screen) and is
//! surfaced as a `SaveFailed` event instead of the regular change event.

use crate::domain::commands::services::{CreateServiceCommand, UpdateServiceCommand};
use crate::domain::events::{ObserverRegistry, StoreEvent, StoreObserver};
use crate::domain::models::{default_catalog, PredefinedService, Service};
use crate::storage::traits::{Connection, ServiceStorage};
use chrono::Local;
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct ServiceStore<C: Connection> {
    repository: C::ServiceRepository,
    services: Arc<Mutex<Vec<Service>>>,
    catalog: Arc<Mutex<Vec<PredefinedService>>>,
    loaded: Arc<AtomicBool>,
    observers: ObserverRegistry,
}

impl<C: Connection> ServiceStore<C> {
    pub fn new(connection: Arc<C>, observers: ObserverRegistry) -> Self {
        Self {
            repository: connection.create_service_repository(),
            services: Arc::new(Mutex::new(Vec::new())),
            catalog: Arc::new(Mutex::new(default_catalog())),
            loaded: Arc::new(AtomicBool::new(false)),
            observers,
        }
    }

    /// Read the persisted collections. Missing documents mean first run;
    /// malformed documents are logged and treated the same way. Never
    /// errors outward.
    pub fn load(&self) {
        match self.repository.load_services() {
            Ok(Some(mut services)) => {
                services.sort_by(|a, b| b.date.cmp(&a.date));
                info!("Loaded {} services", services.len());
                *self.services.lock().unwrap() = services;
            }
            Ok(None) => {}
            Err(e) => {
                error!("Failed to load services, starting empty: {:#}", e);
            }
        }
        match self.repository.load_catalog() {
            Ok(Some(catalog)) => {
                *self.catalog.lock().unwrap() = catalog;
            }
            Ok(None) => {}
            Err(e) => {
                error!("Failed to load catalog, using defaults: {:#}", e);
            }
        }
        self.loaded.store(true, Ordering::SeqCst);
    }

    /// Whether `load` has completed. Callers defer rendering until then.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self, observer: Arc<dyn StoreObserver>) {
        self.observers.subscribe(observer);
    }

    /// Snapshot of the collection, sorted by date descending.
    pub fn services(&self) -> Vec<Service> {
        self.services.lock().unwrap().clone()
    }

    /// Snapshot of the services rendered today.
    pub fn today(&self) -> Vec<Service> {
        let today = Local::now().date_naive();
        self.services
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.parsed_date() == Some(today))
            .cloned()
            .collect()
    }

    pub fn catalog(&self) -> Vec<PredefinedService> {
        self.catalog.lock().unwrap().clone()
    }

    /// Log a new service. The input is trusted (validated at the form
    /// boundary); the store assigns the id and keeps the list sorted.
    pub fn add(&self, command: CreateServiceCommand) -> Service {
        let service = Service {
            id: Service::fresh_id(),
            name: command.name,
            price: command.price,
            payment_method: command.payment_method,
            date: command.date,
        };
        let snapshot = {
            let mut services = self.services.lock().unwrap();
            services.push(service.clone());
            services.sort_by(|a, b| b.date.cmp(&a.date));
            services.clone()
        };
        if self.persist(&snapshot) {
            self.observers.emit(StoreEvent::ServiceAdded { service: service.clone() });
        }
        service
    }

    /// Replace the non-id fields of the record matching `command.id`.
    /// Unknown ids are a silent no-op.
    pub fn update(&self, command: UpdateServiceCommand) {
        let (snapshot, updated) = {
            let mut services = self.services.lock().unwrap();
            let updated = match services.iter_mut().find(|s| s.id == command.id) {
                Some(service) => {
                    service.name = command.name;
                    service.price = command.price;
                    service.payment_method = command.payment_method;
                    service.date = command.date;
                    Some(service.clone())
                }
                None => None,
            };
            if updated.is_some() {
                services.sort_by(|a, b| b.date.cmp(&a.date));
            }
            (services.clone(), updated)
        };
        if let Some(service) = updated {
            if self.persist(&snapshot) {
                self.observers.emit(StoreEvent::ServiceUpdated { service });
            }
        }
    }

    /// Remove the record matching `id`. Absent ids are a silent no-op.
    pub fn delete(&self, id: &str) {
        let (snapshot, removed) = {
            let mut services = self.services.lock().unwrap();
            let before = services.len();
            services.retain(|s| s.id != id);
            (services.clone(), services.len() < before)
        };
        if removed && self.persist(&snapshot) {
            self.observers.emit(StoreEvent::ServiceDeleted { id: id.to_string() });
        }
    }

    /// Insert a batch of records in one persisted transition. Used by the
    /// import flow; emits a single aggregate event, not one per record.
    pub fn bulk_add(&self, commands: Vec<CreateServiceCommand>) -> usize {
        if commands.is_empty() {
            return 0;
        }
        let count = commands.len();
        let snapshot = {
            let mut services = self.services.lock().unwrap();
            for command in commands {
                services.push(Service {
                    id: Service::fresh_id(),
                    name: command.name,
                    price: command.price,
                    payment_method: command.payment_method,
                    date: command.date,
                });
            }
            services.sort_by(|a, b| b.date.cmp(&a.date));
            services.clone()
        };
        if self.persist(&snapshot) {
            info!("Imported {} services", count);
            self.observers.emit(StoreEvent::ServicesImported { count });
        }
        count
    }

    /// Remove every record dated today, keeping the history.
    pub fn clear_today(&self) {
        let today = Local::now().date_naive();
        let (snapshot, removed) = {
            let mut services = self.services.lock().unwrap();
            let before = services.len();
            services.retain(|s| s.parsed_date() != Some(today));
            (services.clone(), before - services.len())
        };
        if removed > 0 && self.persist(&snapshot) {
            self.observers.emit(StoreEvent::TodayCleared { removed });
        }
    }

    /// Wholesale replacement of the template catalog. Entries with an empty
    /// name or a non-positive price are dropped before persisting.
    pub fn save_catalog(&self, entries: Vec<PredefinedService>) {
        let filtered: Vec<PredefinedService> = entries
            .into_iter()
            .filter(|e| !e.name.trim().is_empty() && e.price > 0.0)
            .collect();
        let count = filtered.len();
        *self.catalog.lock().unwrap() = filtered.clone();
        match self.repository.save_catalog(&filtered) {
            Ok(()) => self.observers.emit(StoreEvent::CatalogSaved { count }),
            Err(e) => {
                error!("Failed to save catalog: {:#}", e);
                self.observers.emit(StoreEvent::SaveFailed { reason: format!("{:#}", e) });
            }
        }
    }

    fn persist(&self, services: &[Service]) -> bool {
        match self.repository.save_services(services) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save services: {:#}", e);
                self.observers.emit(StoreEvent::SaveFailed { reason: format!("{:#}", e) });
                false
            }
        }
    }
}
