//! JSON-backed repository for client plans.

use anyhow::{Context, Result};
use log::debug;

use super::connection::JsonConnection;
use crate::domain::models::ClientPlan;
use crate::storage::traits::PlanStorage;

const PLANS_DOCUMENT: &str = "client_plans.json";

#[derive(Clone)]
pub struct PlanRepository {
    connection: JsonConnection,
}

impl PlanRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl PlanStorage for PlanRepository {
    fn load_plans(&self) -> Result<Option<Vec<ClientPlan>>> {
        match self.connection.read_document(PLANS_DOCUMENT)? {
            Some(content) => {
                let plans: Vec<ClientPlan> = serde_json::from_str(&content)
                    .with_context(|| format!("Malformed document {}", PLANS_DOCUMENT))?;
                debug!("Loaded {} plans", plans.len());
                Ok(Some(plans))
            }
            None => Ok(None),
        }
    }

    fn save_plans(&self, plans: &[ClientPlan]) -> Result<()> {
        let content = serde_json::to_string(plans)?;
        self.connection.write_document(PLANS_DOCUMENT, &content)
    }
}
