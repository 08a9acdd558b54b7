//! JSON-backed repository for services and the predefined-service catalog.

use anyhow::{Context, Result};
use log::debug;

use super::connection::JsonConnection;
use crate::domain::models::{PredefinedService, Service};
use crate::storage::traits::ServiceStorage;

const SERVICES_DOCUMENT: &str = "services.json";
const CATALOG_DOCUMENT: &str = "predefined_services.json";

#[derive(Clone)]
pub struct ServiceRepository {
    connection: JsonConnection,
}

impl ServiceRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl ServiceStorage for ServiceRepository {
    fn load_services(&self) -> Result<Option<Vec<Service>>> {
        match self.connection.read_document(SERVICES_DOCUMENT)? {
            Some(content) => {
                let services: Vec<Service> = serde_json::from_str(&content)
                    .with_context(|| format!("Malformed document {}", SERVICES_DOCUMENT))?;
                debug!("Loaded {} services", services.len());
                Ok(Some(services))
            }
            None => Ok(None),
        }
    }

    fn save_services(&self, services: &[Service]) -> Result<()> {
        let content = serde_json::to_string(services)?;
        self.connection.write_document(SERVICES_DOCUMENT, &content)
    }

    fn load_catalog(&self) -> Result<Option<Vec<PredefinedService>>> {
        match self.connection.read_document(CATALOG_DOCUMENT)? {
            Some(content) => {
                let catalog: Vec<PredefinedService> = serde_json::from_str(&content)
                    .with_context(|| format!("Malformed document {}", CATALOG_DOCUMENT))?;
                Ok(Some(catalog))
            }
            None => Ok(None),
        }
    }

    fn save_catalog(&self, catalog: &[PredefinedService]) -> Result<()> {
        let content = serde_json::to_string(catalog)?;
        self.connection.write_document(CATALOG_DOCUMENT, &content)
    }
}
