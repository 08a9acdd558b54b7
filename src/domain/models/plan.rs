//! Domain model for a prepaid client plan.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A prepaid bundle of a fixed number of future cuts for one client.
///
/// Invariant: `0 <= remaining_cuts <= total_cuts` at all times.
/// `remaining_cuts` only ever changes through the plan store's consume and
/// reset operations (or a full edit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPlan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub total_cuts: u32,
    pub remaining_cuts: u32,
}

impl ClientPlan {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn has_credits(&self) -> bool {
        self.remaining_cuts > 0
    }
}

/// Validation errors surfaced by the form boundary before a plan reaches
/// the store.
#[derive(Debug, thiserror::Error)]
pub enum PlanValidationError {
    #[error("Client name cannot be empty")]
    EmptyName,
    #[error("Price must be greater than zero")]
    NonPositivePrice,
    #[error("Plan must include at least one cut")]
    NoCuts,
}

pub fn validate_plan_input(
    name: &str,
    price: f64,
    total_cuts: u32,
) -> Result<(), PlanValidationError> {
    if name.trim().is_empty() {
        return Err(PlanValidationError::EmptyName);
    }
    if price <= 0.0 {
        return Err(PlanValidationError::NonPositivePrice);
    }
    if total_cuts == 0 {
        return Err(PlanValidationError::NoCuts);
    }
    Ok(())
}
