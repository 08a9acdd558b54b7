//! Domain-level command and query types.
//!
//! These structs are the inputs the stores and services accept. The form
//! layer validates user input and maps it to these types; the stores trust
//! them as already validated.

pub mod services {
    use crate::domain::models::PaymentMethod;

    /// Input for logging a new service (everything but the id, which the
    /// store assigns).
    #[derive(Debug, Clone)]
    pub struct CreateServiceCommand {
        pub name: String,
        pub price: f64,
        pub payment_method: PaymentMethod,
        /// ISO calendar date (`yyyy-MM-dd`).
        pub date: String,
    }

    /// Full replacement of a service's non-id fields.
    #[derive(Debug, Clone)]
    pub struct UpdateServiceCommand {
        pub id: String,
        pub name: String,
        pub price: f64,
        pub payment_method: PaymentMethod,
        pub date: String,
    }
}

pub mod plans {
    use crate::domain::models::PaymentMethod;

    /// How a plan purchase or renewal was paid, and whether that payment
    /// should show up in the daily revenue log.
    #[derive(Debug, Clone)]
    pub struct PlanPayment {
        pub payment_method: PaymentMethod,
        pub add_to_revenue: bool,
    }

    /// Input for registering a new client plan. `remaining_cuts` is not
    /// accepted here; it always starts at `total_cuts`.
    #[derive(Debug, Clone)]
    pub struct CreatePlanCommand {
        pub name: String,
        pub price: f64,
        pub total_cuts: u32,
        pub payment: Option<PlanPayment>,
    }

    /// Full replacement of a plan's non-id fields.
    #[derive(Debug, Clone)]
    pub struct UpdatePlanCommand {
        pub id: String,
        pub name: String,
        pub price: f64,
        pub total_cuts: u32,
        pub remaining_cuts: u32,
    }
}
