//! Domain model for a billed service.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// How the customer paid for a service.
///
/// Serialized with the labels the persisted documents use
/// (`"dinheiro"` / `"pagamento online"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "dinheiro")]
    Dinheiro,
    #[serde(rename = "pagamento online")]
    PagamentoOnline,
}

impl PaymentMethod {
    /// User-facing label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Dinheiro => "dinheiro",
            PaymentMethod::PagamentoOnline => "pagamento online",
        }
    }

    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Dinheiro)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single performed and billed action.
///
/// `date` is an ISO calendar date (`yyyy-MM-dd`). It is kept as a string so
/// that a record with a damaged date still loads and lists; aggregation
/// parses it on demand and skips records it cannot parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub payment_method: PaymentMethod,
    pub date: String,
}

impl Service {
    /// Generate a unique service ID from the current timestamp.
    /// Format: svc-<epoch_millis>-<hex suffix>
    /// Example: svc-1718020800123-a3f1
    pub fn generate_id(timestamp_ms: u64) -> String {
        format!("svc-{}-{}", timestamp_ms, Self::generate_random_suffix(4))
    }

    /// Convenience wrapper using the wall clock.
    pub fn fresh_id() -> String {
        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self::generate_id(now_millis)
    }

    /// Calendar date of the service, if the stored string is well formed.
    pub fn parsed_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    fn generate_random_suffix(len: usize) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("{:x}", now % (16_u128.pow(len as u32)))
            .chars()
            .take(len)
            .collect()
    }
}

/// A reusable (name, price) template offered as a shortcut when logging a
/// service. Not individually identified; uniqueness is by name within the
/// catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredefinedService {
    pub name: String,
    pub price: f64,
}

/// Catalog seeded on first run, before the user edits it.
pub fn default_catalog() -> Vec<PredefinedService> {
    vec![
        PredefinedService { name: "Corte padrão".to_string(), price: 30.0 },
        PredefinedService { name: "Corte + barba".to_string(), price: 50.0 },
        PredefinedService { name: "Sobrancelha".to_string(), price: 10.0 },
        PredefinedService { name: "Corte navalhado".to_string(), price: 35.0 },
        PredefinedService { name: "Corte maquina".to_string(), price: 20.0 },
    ]
}

/// Validation errors surfaced by the form boundary before a service reaches
/// the store.
#[derive(Debug, thiserror::Error)]
pub enum ServiceValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Price must be greater than zero")]
    NonPositivePrice,
    #[error("Date must be a calendar date in yyyy-MM-dd form")]
    InvalidDate,
}

/// Boundary validation for service input. The store itself does not
/// re-validate.
pub fn validate_service_input(
    name: &str,
    price: f64,
    date: &str,
) -> Result<(), ServiceValidationError> {
    if name.trim().is_empty() {
        return Err(ServiceValidationError::EmptyName);
    }
    if price <= 0.0 {
        return Err(ServiceValidationError::NonPositivePrice);
    }
    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(ServiceValidationError::InvalidDate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = Service::generate_id(1718020800123);
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "svc");
        assert_eq!(parts[1], "1718020800123");
        assert_eq!(parts[2].len(), 4);
    }

    #[test]
    fn test_service_json_shape() {
        let service = Service {
            id: "svc-1-abcd".to_string(),
            name: "Corte padrão".to_string(),
            price: 30.0,
            payment_method: PaymentMethod::Dinheiro,
            date: "2024-06-10".to_string(),
        };
        let json = serde_json::to_value(&service).unwrap();
        assert_eq!(json["paymentMethod"], "dinheiro");
        assert_eq!(json["date"], "2024-06-10");
        assert_eq!(json["price"], 30.0);

        let online = Service {
            payment_method: PaymentMethod::PagamentoOnline,
            ..service
        };
        let json = serde_json::to_value(&online).unwrap();
        assert_eq!(json["paymentMethod"], "pagamento online");
    }

    #[test]
    fn test_parsed_date() {
        let mut service = Service {
            id: "svc-1-abcd".to_string(),
            name: "Corte padrão".to_string(),
            price: 30.0,
            payment_method: PaymentMethod::Dinheiro,
            date: "2024-06-10".to_string(),
        };
        assert_eq!(
            service.parsed_date(),
            chrono::NaiveDate::from_ymd_opt(2024, 6, 10)
        );

        service.date = "10/06/2024".to_string();
        assert_eq!(service.parsed_date(), None);
    }

    #[test]
    fn test_default_catalog_seed() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog[0].name, "Corte padrão");
        assert_eq!(catalog[0].price, 30.0);
    }

    #[test]
    fn test_validate_service_input() {
        assert!(validate_service_input("Corte padrão", 30.0, "2024-06-10").is_ok());
        assert!(matches!(
            validate_service_input("  ", 30.0, "2024-06-10"),
            Err(ServiceValidationError::EmptyName)
        ));
        assert!(matches!(
            validate_service_input("Corte", 0.0, "2024-06-10"),
            Err(ServiceValidationError::NonPositivePrice)
        ));
        assert!(matches!(
            validate_service_input("Corte", 30.0, "junho 10"),
            Err(ServiceValidationError::InvalidDate)
        ));
    }
}
