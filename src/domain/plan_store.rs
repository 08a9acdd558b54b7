//! Plans store: the single owner of the client-plan collection.
//!
//! A plan purchase or renewal can optionally show up in the daily revenue
//! log. That companion record goes through the services store collaborator
//! and only after the plan document persisted, so revenue is never recorded
//! for a plan mutation that did not stick.

use crate::domain::commands::plans::{CreatePlanCommand, PlanPayment, UpdatePlanCommand};
use crate::domain::commands::services::CreateServiceCommand;
use crate::domain::events::{ObserverRegistry, StoreEvent, StoreObserver};
use crate::domain::models::ClientPlan;
use crate::domain::service_store::ServiceStore;
use crate::storage::traits::{Connection, PlanStorage};
use chrono::Local;
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct PlanStore<C: Connection> {
    repository: C::PlanRepository,
    plans: Arc<Mutex<Vec<ClientPlan>>>,
    service_store: ServiceStore<C>,
    loaded: Arc<AtomicBool>,
    observers: ObserverRegistry,
}

impl<C: Connection> PlanStore<C> {
    pub fn new(
        connection: Arc<C>,
        service_store: ServiceStore<C>,
        observers: ObserverRegistry,
    ) -> Self {
        Self {
            repository: connection.create_plan_repository(),
            plans: Arc::new(Mutex::new(Vec::new())),
            service_store,
            loaded: Arc::new(AtomicBool::new(false)),
            observers,
        }
    }

    /// Read the persisted collection. Missing or malformed storage yields an
    /// empty collection; never errors outward.
    pub fn load(&self) {
        match self.repository.load_plans() {
            Ok(Some(mut plans)) => {
                plans.sort_by(|a, b| a.name.cmp(&b.name));
                info!("Loaded {} plans", plans.len());
                *self.plans.lock().unwrap() = plans;
            }
            Ok(None) => {}
            Err(e) => {
                error!("Failed to load plans, starting empty: {:#}", e);
            }
        }
        self.loaded.store(true, Ordering::SeqCst);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self, observer: Arc<dyn StoreObserver>) {
        self.observers.subscribe(observer);
    }

    /// Snapshot of the collection, sorted by client name ascending.
    pub fn plans(&self) -> Vec<ClientPlan> {
        self.plans.lock().unwrap().clone()
    }

    /// Register a new plan. Credits start full. When the payment asks to be
    /// recorded as revenue, a companion service is logged through the
    /// services store.
    pub fn add(&self, command: CreatePlanCommand) -> ClientPlan {
        let plan = ClientPlan {
            id: ClientPlan::generate_id(),
            name: command.name,
            price: command.price,
            total_cuts: command.total_cuts,
            remaining_cuts: command.total_cuts,
        };
        let snapshot = {
            let mut plans = self.plans.lock().unwrap();
            plans.push(plan.clone());
            plans.sort_by(|a, b| a.name.cmp(&b.name));
            plans.clone()
        };
        if self.persist(&snapshot) {
            self.observers.emit(StoreEvent::PlanAdded { plan: plan.clone() });
            self.record_payment(command.payment, format!("Plano - {}", plan.name), plan.price);
        }
        plan
    }

    /// Replace the non-id fields of the plan matching `command.id`. The
    /// remaining count is clamped to the new capacity so the invariant
    /// `remaining_cuts <= total_cuts` holds. Unknown ids are a silent no-op.
    pub fn update(&self, command: UpdatePlanCommand) {
        let (snapshot, updated) = {
            let mut plans = self.plans.lock().unwrap();
            let updated = match plans.iter_mut().find(|p| p.id == command.id) {
                Some(plan) => {
                    plan.name = command.name;
                    plan.price = command.price;
                    plan.total_cuts = command.total_cuts;
                    plan.remaining_cuts = command.remaining_cuts.min(command.total_cuts);
                    Some(plan.clone())
                }
                None => None,
            };
            if updated.is_some() {
                plans.sort_by(|a, b| a.name.cmp(&b.name));
            }
            (plans.clone(), updated)
        };
        if let Some(plan) = updated {
            if self.persist(&snapshot) {
                self.observers.emit(StoreEvent::PlanUpdated { plan });
            }
        }
    }

    /// Remove the plan matching `id`. Absent ids are a silent no-op.
    pub fn delete(&self, id: &str) {
        let (snapshot, removed) = {
            let mut plans = self.plans.lock().unwrap();
            let before = plans.len();
            plans.retain(|p| p.id != id);
            (plans.clone(), plans.len() < before)
        };
        if removed && self.persist(&snapshot) {
            self.observers.emit(StoreEvent::PlanDeleted { id: id.to_string() });
        }
    }

    /// Debit one cut from the plan. At zero credits nothing changes, but a
    /// warning is surfaced so the user knows the plan ran out. Unknown ids
    /// are a no-op.
    pub fn consume_credit(&self, id: &str) {
        enum Outcome {
            Consumed(ClientPlan),
            Exhausted(String),
            NotFound,
        }
        let (snapshot, outcome) = {
            let mut plans = self.plans.lock().unwrap();
            let outcome = match plans.iter_mut().find(|p| p.id == id) {
                Some(plan) if plan.remaining_cuts > 0 => {
                    plan.remaining_cuts -= 1;
                    Outcome::Consumed(plan.clone())
                }
                Some(plan) => Outcome::Exhausted(plan.name.clone()),
                None => Outcome::NotFound,
            };
            (plans.clone(), outcome)
        };
        match outcome {
            Outcome::Consumed(plan) => {
                if self.persist(&snapshot) {
                    self.observers.emit(StoreEvent::CreditConsumed { plan });
                }
            }
            Outcome::Exhausted(plan_name) => {
                warn!("Plan '{}' has no credits remaining", plan_name);
                self.observers.emit(StoreEvent::NoCreditsRemaining { plan_name });
            }
            Outcome::NotFound => {}
        }
    }

    /// Renew the plan: credits go back to full capacity regardless of the
    /// prior value. Optionally records the renewal payment as revenue, same
    /// contract as `add`.
    pub fn reset_credits(&self, id: &str, payment: Option<PlanPayment>) {
        let (snapshot, renewed) = {
            let mut plans = self.plans.lock().unwrap();
            let renewed = match plans.iter_mut().find(|p| p.id == id) {
                Some(plan) => {
                    plan.remaining_cuts = plan.total_cuts;
                    Some(plan.clone())
                }
                None => None,
            };
            (plans.clone(), renewed)
        };
        if let Some(plan) = renewed {
            if self.persist(&snapshot) {
                self.observers.emit(StoreEvent::PlanRenewed { plan: plan.clone() });
                self.record_payment(payment, format!("Renovação - {}", plan.name), plan.price);
            }
        }
    }

    fn record_payment(&self, payment: Option<PlanPayment>, name: String, price: f64) {
        let Some(payment) = payment else { return };
        if !payment.add_to_revenue {
            return;
        }
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        self.service_store.add(CreateServiceCommand {
            name,
            price,
            payment_method: payment.payment_method,
            date: today,
        });
    }

    fn persist(&self, plans: &[ClientPlan]) -> bool {
        match self.repository.save_plans(plans) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save plans: {:#}", e);
                self.observers.emit(StoreEvent::SaveFailed { reason: format!("{:#}", e) });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::test_support::RecordingObserver;
    use crate::domain::models::PaymentMethod;
    use crate::storage::json::JsonConnection;
    use tempfile::TempDir;

    fn setup_test_store() -> (
        PlanStore<JsonConnection>,
        ServiceStore<JsonConnection>,
        Arc<RecordingObserver>,
        TempDir,
    ) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        let observers = ObserverRegistry::new();
        let service_store = ServiceStore::new(connection.clone(), observers.clone());
        service_store.load();
        let plan_store = PlanStore::new(connection, service_store.clone(), observers);
        plan_store.load();
        let observer = RecordingObserver::new();
        plan_store.subscribe(observer.clone());
        (plan_store, service_store, observer, temp_dir)
    }

    fn plano(name: &str, payment: Option<PlanPayment>) -> CreatePlanCommand {
        CreatePlanCommand {
            name: name.to_string(),
            price: 100.0,
            total_cuts: 4,
            payment,
        }
    }

    #[test]
    fn test_add_starts_with_full_credits() {
        let (store, _services, observer, _temp_dir) = setup_test_store();
        let plan = store.add(plano("João", None));
        assert_eq!(plan.remaining_cuts, 4);
        assert_eq!(store.plans().len(), 1);
        assert_eq!(observer.events()[0], StoreEvent::PlanAdded { plan });
    }

    #[test]
    fn test_collection_sorted_by_name() {
        let (store, _services, _observer, _temp_dir) = setup_test_store();
        store.add(plano("Pedro", None));
        store.add(plano("Ana", None));
        store.add(plano("João", None));

        let plans = store.plans();
        let names: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "João", "Pedro"]);
    }

    #[test]
    fn test_consume_and_reset_cycle() {
        let (store, _services, _observer, _temp_dir) = setup_test_store();
        let plan = store.add(plano("João", None));

        store.consume_credit(&plan.id);
        store.consume_credit(&plan.id);
        store.consume_credit(&plan.id);
        assert_eq!(store.plans()[0].remaining_cuts, 1);

        store.reset_credits(&plan.id, None);
        assert_eq!(store.plans()[0].remaining_cuts, 4);
    }

    #[test]
    fn test_consume_at_zero_warns_without_mutation() {
        let (store, _services, observer, _temp_dir) = setup_test_store();
        let plan = store.add(plano("João", None));
        for _ in 0..4 {
            store.consume_credit(&plan.id);
        }
        assert_eq!(store.plans()[0].remaining_cuts, 0);
        let events_before = observer.count();

        store.consume_credit(&plan.id);

        assert_eq!(store.plans()[0].remaining_cuts, 0);
        assert_eq!(observer.count(), events_before + 1);
        assert_eq!(
            observer.events().last().unwrap(),
            &StoreEvent::NoCreditsRemaining { plan_name: "João".to_string() }
        );
    }

    #[test]
    fn test_consume_unknown_id_is_noop() {
        let (store, _services, observer, _temp_dir) = setup_test_store();
        store.add(plano("João", None));
        let events_before = observer.count();
        store.consume_credit("missing");
        assert_eq!(observer.count(), events_before);
    }

    #[test]
    fn test_purchase_can_record_revenue() {
        let (store, services, _observer, _temp_dir) = setup_test_store();
        let plan = store.add(plano(
            "João",
            Some(PlanPayment {
                payment_method: PaymentMethod::Dinheiro,
                add_to_revenue: true,
            }),
        ));

        let today = services.today();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].name, "Plano - João");
        assert_eq!(today[0].price, plan.price);
        assert_eq!(today[0].payment_method, PaymentMethod::Dinheiro);
    }

    #[test]
    fn test_purchase_without_revenue_flag_records_nothing() {
        let (store, services, _observer, _temp_dir) = setup_test_store();
        store.add(plano(
            "João",
            Some(PlanPayment {
                payment_method: PaymentMethod::Dinheiro,
                add_to_revenue: false,
            }),
        ));
        store.add(plano("Maria", None));
        assert!(services.services().is_empty());
    }

    #[test]
    fn test_renewal_can_record_revenue() {
        let (store, services, _observer, _temp_dir) = setup_test_store();
        let plan = store.add(plano("João", None));
        store.consume_credit(&plan.id);

        store.reset_credits(
            &plan.id,
            Some(PlanPayment {
                payment_method: PaymentMethod::PagamentoOnline,
                add_to_revenue: true,
            }),
        );

        let today = services.today();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].name, "Renovação - João");
        assert_eq!(today[0].payment_method, PaymentMethod::PagamentoOnline);
    }

    #[test]
    fn test_update_replaces_and_clamps_remaining() {
        let (store, _services, _observer, _temp_dir) = setup_test_store();
        let plan = store.add(plano("João", None));

        store.update(UpdatePlanCommand {
            id: plan.id.clone(),
            name: "João Pedro".to_string(),
            price: 120.0,
            total_cuts: 2,
            remaining_cuts: 4,
        });

        let updated = &store.plans()[0];
        assert_eq!(updated.name, "João Pedro");
        assert_eq!(updated.total_cuts, 2);
        assert_eq!(updated.remaining_cuts, 2);
    }

    #[test]
    fn test_delete_removes_plan() {
        let (store, _services, observer, _temp_dir) = setup_test_store();
        let plan = store.add(plano("João", None));
        store.delete(&plan.id);
        assert!(store.plans().is_empty());
        assert_eq!(
            observer.events().last().unwrap(),
            &StoreEvent::PlanDeleted { id: plan.id }
        );

        store.delete("missing");
        assert_eq!(observer.count(), 2);
    }

    #[test]
    fn test_mutations_survive_reload() {
        let (store, _services, _observer, temp_dir) = setup_test_store();
        let plan = store.add(plano("João", None));
        store.consume_credit(&plan.id);

        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        let observers = ObserverRegistry::new();
        let service_store = ServiceStore::new(connection.clone(), observers.clone());
        let reloaded = PlanStore::new(connection, service_store, observers);
        reloaded.load();
        assert_eq!(reloaded.plans()[0].remaining_cuts, 3);
    }
}
