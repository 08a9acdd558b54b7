//! User-facing notification layer.
//!
//! Maps store change events to the toast messages the UI shows. This lives
//! outside the stores on purpose: persistence emits events, and this thin
//! layer owns the wording, so changing notification text never touches the
//! store invariants.

use crate::domain::events::{StoreEvent, StoreObserver};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// One user-visible notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

impl Toast {
    fn new(title: &str, description: Option<String>, variant: ToastVariant) -> Self {
        Self { title: title.to_string(), description, variant }
    }
}

/// The toast shown for a given store event.
pub fn toast_for_event(event: &StoreEvent) -> Toast {
    match event {
        StoreEvent::ServiceAdded { service } => Toast::new(
            "Serviço adicionado",
            Some(format!("\"{}\" foi adicionado à lista.", service.name)),
            ToastVariant::Default,
        ),
        StoreEvent::ServiceUpdated { service } => Toast::new(
            "Serviço atualizado",
            Some(format!("\"{}\" foi atualizado.", service.name)),
            ToastVariant::Default,
        ),
        StoreEvent::ServiceDeleted { .. } => {
            Toast::new("Serviço deletado", None, ToastVariant::Destructive)
        }
        StoreEvent::ServicesImported { count } => Toast::new(
            "Importação concluída",
            Some(format!("{} serviços foram adicionados ao histórico.", count)),
            ToastVariant::Default,
        ),
        StoreEvent::TodayCleared { .. } => Toast::new(
            "Lista limpa",
            Some("Os serviços de hoje foram removidos.".to_string()),
            ToastVariant::Destructive,
        ),
        StoreEvent::CatalogSaved { .. } => Toast::new(
            "Serviços salvos",
            Some("A lista de serviços pré-definidos foi atualizada.".to_string()),
            ToastVariant::Default,
        ),
        StoreEvent::PlanAdded { plan } => Toast::new(
            "Plano adicionado",
            Some(format!("Plano para \"{}\" foi criado.", plan.name)),
            ToastVariant::Default,
        ),
        StoreEvent::PlanUpdated { plan } => Toast::new(
            "Plano atualizado",
            Some(format!("Plano de \"{}\" foi atualizado.", plan.name)),
            ToastVariant::Default,
        ),
        StoreEvent::PlanDeleted { .. } => {
            Toast::new("Plano deletado", None, ToastVariant::Destructive)
        }
        StoreEvent::CreditConsumed { plan } => Toast::new(
            "Corte utilizado!",
            Some(format!("Um corte foi debitado do plano de {}.", plan.name)),
            ToastVariant::Default,
        ),
        StoreEvent::NoCreditsRemaining { plan_name } => Toast::new(
            "Atenção!",
            Some(format!("O plano de {} não tem cortes restantes.", plan_name)),
            ToastVariant::Destructive,
        ),
        StoreEvent::PlanRenewed { plan } => Toast::new(
            "Plano Reiniciado!",
            Some(format!("O plano de {} foi renovado.", plan.name)),
            ToastVariant::Default,
        ),
        StoreEvent::SaveFailed { .. } => Toast::new(
            "Erro ao salvar dados",
            Some("Não foi possível salvar as alterações.".to_string()),
            ToastVariant::Destructive,
        ),
    }
}

/// Observer that turns events into toasts and queues them for the UI to
/// drain on its next frame.
#[derive(Default)]
pub struct ToastCenter {
    queue: Mutex<VecDeque<Toast>>,
}

impl ToastCenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Take every queued toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        self.queue.lock().unwrap().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().unwrap().is_empty()
    }
}

impl StoreObserver for ToastCenter {
    fn notify(&self, event: &StoreEvent) {
        self.queue.lock().unwrap().push_back(toast_for_event(event));
    }
}
